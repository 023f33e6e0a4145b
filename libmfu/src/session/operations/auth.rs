// libmfu-rs/libmfu/src/session/operations/auth.rs

//! PWD_AUTH for EV1 and NTAG tags.

use log::{debug, info};

use crate::driver::Driver;
use crate::protocol::commands;
use crate::session::{RawMode, Session};
use crate::types::{Credentials, Pack, Password};
use crate::{Error, Result};

/// PWD_AUTH exchange. The first two response bytes are the pack; any
/// transport error or a shorter answer is an authentication failure.
pub fn authenticate<D: Driver>(session: &mut Session<D>, password: Password) -> Result<Pack> {
    info!("Authing with PWD: {}", password);

    let mut raw = RawMode::enter(&mut session.driver)?;
    let res = raw.transceive_frame(&commands::pwd_auth(&password));
    let restored = raw.finish();

    let rx = res.map_err(|e| {
        debug!("PWD_AUTH: {}", e);
        Error::AuthFailed
    })?;
    let pack = Pack::try_from(&rx[..]).map_err(|_| Error::AuthFailed)?;
    if let Err(e) = restored {
        debug!("unable to leave raw mode after PWD_AUTH: {}", e);
        return Err(Error::AuthFailed);
    }

    session.credentials = Credentials::new(password, pack);
    info!("Success - PACK: {}", pack);
    Ok(pack)
}
