use pyo3::prelude::*;

/// Add `child` to `parent` and register it in `sys.modules` as
/// `{prefix}.{child}` so it can be imported directly.
pub fn register_submodule(
    py: Python<'_>,
    parent: &Bound<'_, PyModule>,
    child: &Bound<'_, PyModule>,
    prefix: &str,
) -> PyResult<()> {
    parent.add_submodule(child)?;
    let full_name = format!("{}.{}", prefix, child.name()?);
    py.import("sys")?
        .getattr("modules")?
        .set_item(full_name, child)?;
    Ok(())
}
