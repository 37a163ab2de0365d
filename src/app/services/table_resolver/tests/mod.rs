//! Shared fixtures for table resolver tests

use std::fs;
use std::path::Path;


/// Excerpt of a WMO combined code/flag table file
pub const TABLE_CSV: &str = r#"Category,CodeFigure,EntryName_en,EntryName_sub1_en,FXY,ElementName_en,Status
01,0,"Automatic station",,002001,Type of station,Operational
01,1,"Manned station",,002001,Type of station,Operational
01,2,"Hybrid: both manned and automatic",,002001,Type of station,Operational
01,3,"Missing value",,002001,Type of station,Operational
08,4-99,"Reserved",,008021,Time significance,Operational
08,2,"Time averaged",,008021,Time significance,Operational
02,1,"Automatic data processing",,002002,Type of instrumentation for wind measurement,Operational
02,2,"Certified instruments",,002002,Type of instrumentation for wind measurement,Operational
02,3,"Originally measured in knots",,002002,Type of instrumentation for wind measurement,Operational
02,All 4,"Missing value",,002002,Type of instrumentation for wind measurement,Operational
xx,5,"Broken row",,12345,Malformed,Operational
"#;

/// Write the table excerpt under `{root}/{version}/BUFRCREX_CodeFlag_en.txt`
pub fn write_table(root: &Path, version: u32) -> std::io::Result<()> {
    let dir = root.join(version.to_string());
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("BUFRCREX_CodeFlag_en.txt"), TABLE_CSV)
}
