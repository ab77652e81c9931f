use pyo3_stub_gen::Result;

fn main() -> Result<()> {
    let stub = hymod_rs::stub_info()?;
    stub.generate()?;
    Ok(())
}
