use serde::Serialize;
use vayu_core::error::VayuError;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), VayuError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
