use luft_core::error::LuftError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), LuftError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
