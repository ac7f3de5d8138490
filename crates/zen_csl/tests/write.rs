use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tracing_test::traced_test;
use zen_csl::error::Result;
use zen_csl::{CslWriter, CslWriterOptions};
use zen_ou::codepage::windows;

fn resource(path: &str) -> PathBuf {
    PathBuf::from(format!("{}/{path}", env!("CARGO_MANIFEST_DIR")))
}

fn options() -> CslWriterOptions {
    CslWriterOptions::builder()
        .date(
            NaiveDate::from_ymd_opt(2002, 3, 12)
                .unwrap()
                .and_hms_opt(14, 5, 9)
                .unwrap(),
        )
        .build()
}

#[traced_test]
#[test]
fn convert_ou() -> Result<()> {
    let cp = windows(1252).unwrap();

    let file = File::open(resource("../zen_ou/resources/ou.bin"))?;
    let library = zen_ou::decode(BufReader::new(file), &cp)?;

    let actual = CslWriter::new(Vec::new(), &cp, options()).write_library(&library)?;
    let expected = std::fs::read(resource("resources/ou.csl"))?;

    assert_eq!(
        String::from_utf8_lossy(&actual),
        String::from_utf8_lossy(&expected)
    );
    assert_eq!(actual, expected);

    Ok(())
}

#[test]
fn promoted_attributes_survive_conversion() -> Result<()> {
    let cp = windows(1252).unwrap();

    let file = File::open(resource("../zen_ou/resources/ou.bin"))?;
    let library = zen_ou::decode(BufReader::new(file), &cp)?;
    let bytes = zen_csl::encode(&library, &cp)?;
    let text = cp.decode(&bytes).0;

    for block in library.iter() {
        assert!(text.contains(&format!("\tblockName=string:{}\n", block.block_name)));
        for message in block.children.iter().flat_map(|a| a.children.iter()) {
            assert!(text.contains(&format!("\t\t\t\ttext=string:{}\n", message.text)));
            assert!(text.contains(&format!("\t\t\t\tname=string:{}\n", message.name)));
        }
    }

    Ok(())
}
