// Validate WGSL with naga before handing it to the device so compile errors
// carry naga's span-annotated report instead of a bare wgpu message.
pub fn validate_wgsl(source: &str) -> Result<naga::Module, String> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| e.emit_to_string(source))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| e.emit_to_string(source))?;

    Ok(module)
}

/// True if the module declares at least one entry point for `stage`.
pub fn has_entry_point(module: &naga::Module, stage: naga::ShaderStage) -> bool {
    module.entry_points.iter().any(|ep| ep.stage == stage)
}
