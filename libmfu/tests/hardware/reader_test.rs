#![cfg(feature = "libnfc")]

use libmfu::driver::LibnfcDriver;
use libmfu::session::{Session, SessionConfig};
use libmfu::Error;

// These tests need a libnfc-supported reader and, for the read test, an
// Ultralight-family tag on it. They are marked `#[ignore]`; run manually with:
//
// cargo test -p libmfu --test hardware --features libnfc -- --ignored

fn open_reader() -> anyhow::Result<Option<LibnfcDriver>> {
    match LibnfcDriver::open(None) {
        Ok(driver) => Ok(Some(driver)),
        Err(Error::DeviceNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[test]
#[ignore]
fn open_reader_and_init() -> anyhow::Result<()> {
    if let Some(driver) = open_reader()? {
        Session::open(driver, SessionConfig::default())?;
    }
    Ok(())
}

#[test]
#[ignore]
fn read_tag_on_reader() -> anyhow::Result<()> {
    let Some(driver) = open_reader()? else {
        return Ok(());
    };
    let mut session = Session::open(driver, SessionConfig::default())?;
    session.select()?;
    session.check_ultralight()?;
    let variant = session.detect_variant()?;
    let report = session.read_all();
    assert_eq!(report.pages, variant.pages());
    Ok(())
}
