pub mod schema;

use anyhow::Result;
use schema::SheetGeometry;

pub fn load_from_yaml_str(s: &str) -> Result<SheetGeometry> {
    let geo: SheetGeometry = serde_yaml::from_str(s)?;
    Ok(geo)
}

pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<SheetGeometry> {
    let data = std::fs::read_to_string(path)?;
    load_from_yaml_str(&data)
}
