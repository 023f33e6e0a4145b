// libmfu-rs/libmfu/src/cli.rs

//! Front end of the `nfc-mfultralight` binary. Kept in the library so the
//! whole flow runs against any [`Driver`].

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, warn, LevelFilter};

use crate::constants::{DEFAULT_START_BYTE, DEFAULT_STOP_BYTE};
use crate::driver::Driver;
use crate::image::PageImage;
use crate::policy::WritePolicy;
use crate::session::{Session, SessionConfig};
use crate::tag::TagVariant;
use crate::types::{Password, Uid};
use crate::{Error, Result};

/// Command line of `nfc-mfultralight`.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "nfc-mfultralight",
    version,
    about = "Dump and restore MIFARE Ultralight, Ultralight EV1 and NTAG21x tags"
)]
pub struct Args {
    /// Log some debug information
    #[arg(short = 'd')]
    pub debug: bool,

    /// Wait until a tag enters the field
    #[arg(short = 'w')]
    pub wait: bool,

    /// Authenticate with this password (8 hex digits) before reading
    #[arg(long = "pw", value_name = "PWD")]
    pub password: Option<Password>,

    /// Only use the tag with this UID (hex)
    #[arg(long)]
    pub uid: Option<Uid>,

    /// Save the tag memory to a file
    #[arg(long, value_name = "FILE")]
    pub dump: Option<PathBuf>,

    /// Write a dump file back to the tag
    #[arg(long, value_name = "FILE")]
    pub restore: Option<PathBuf>,

    /// Write OTP/capability bytes without asking
    #[arg(long)]
    pub otp: bool,

    /// Write lock bytes without asking
    #[arg(long)]
    pub lock: bool,

    /// Write dynamic lock bytes without asking
    #[arg(long)]
    pub dynlock: bool,

    /// Write UID pages without asking (magic tags only)
    #[arg(long = "write-uid")]
    pub write_uid: bool,

    /// Byte range to print: [startByte [stopByte]]
    #[arg(value_name = "BYTE")]
    pub range: Vec<String>,
}

impl Args {
    /// Diagnostics reach stderr only with `-d`; otherwise just errors.
    pub fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Error
        }
    }
}

/// Byte range of the linear image printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte printed
    pub start: usize,
    /// One past the last byte printed
    pub stop: usize,
}

impl Default for ByteRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_BYTE,
            stop: DEFAULT_STOP_BYTE,
        }
    }
}

/// Leading decimal number of `s`, 0 if there is none.
fn atoi(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let n = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        });
    if negative { -n } else { n }
}

/// Positional values that are not positive numbers are ignored; the first
/// two positive ones are start and stop. A third is a usage error.
pub fn parse_byte_range(values: &[String]) -> Result<ByteRange> {
    let mut start = None;
    let mut stop = None;
    for v in values {
        let n = atoi(v);
        if n <= 0 {
            continue;
        }
        let n = n as usize;
        if start.is_none() {
            start = Some(n);
        } else if stop.is_none() {
            stop = Some(n);
        } else {
            return Err(Error::Usage(format!("unexpected byte argument '{}'", v)));
        }
    }

    let range = ByteRange {
        start: start.unwrap_or(DEFAULT_START_BYTE),
        stop: stop.unwrap_or(DEFAULT_STOP_BYTE),
    };
    if range.stop <= range.start {
        warn!("start/stop messed up: {} <= {} == bad", range.stop, range.start);
    }
    Ok(range)
}

/// Yes/no questions asked before a write.
pub trait Confirm {
    /// True when the operator answers yes.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Asks on stderr and reads the answer from stdin. Anything not starting
/// with `y` or `Y` is a no.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let mut stderr = io::stderr();
        write!(stderr, "{} [yN] ", question)?;
        stderr.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(matches!(line.chars().next(), Some('y' | 'Y')))
    }
}

/// Turn flags into a write policy, asking for every toggle that was not
/// given. The dynamic lock question only applies to tags that have them.
pub fn resolve_policy<C: Confirm + ?Sized>(
    args: &Args,
    variant: TagVariant,
    confirm: &mut C,
) -> Result<WritePolicy> {
    let mut policy = WritePolicy {
        write_otp: args.otp,
        write_lock: args.lock,
        write_dyn_lock: args.dynlock,
        write_uid: args.write_uid,
    };
    if !policy.write_otp {
        policy.write_otp = confirm.confirm("Write OTP/Capability Bytes ?")?;
    }
    if !policy.write_lock {
        policy.write_lock = confirm.confirm("Write Lock Bytes (Warning: OTP if set) ?")?;
    }
    if !policy.write_dyn_lock && variant.dynamic_lock_page().is_some() {
        policy.write_dyn_lock = confirm.confirm("Write Dynamic Lock Bytes ?")?;
    }
    if !policy.write_uid {
        policy.write_uid =
            confirm.confirm("Write UID bytes (only for special writeable UID cards) ?")?;
    }
    Ok(policy)
}

/// Full run: select, classify, authenticate, read, print the byte range,
/// then optionally save a dump and restore one.
pub fn run<D, W, C>(args: &Args, driver: D, out: &mut W, confirm: &mut C) -> Result<()>
where
    D: Driver,
    W: Write + ?Sized,
    C: Confirm + ?Sized,
{
    let range = parse_byte_range(&args.range)?;
    let config = SessionConfig {
        uid_filter: args.uid,
        ..SessionConfig::default()
    };

    let mut session = Session::open(driver, config)?;
    if let Err(e) = session.list_targets() {
        debug!("unable to list targets: {}", e);
    }
    if args.wait {
        session.wait_for_tag()?;
    } else {
        session.select()?;
    }
    let target = session.check_ultralight()?;
    info!("Using MIFARE Ultralight card with UID: {}", target.uid);

    session.detect_variant()?;
    if let Some(password) = args.password {
        session.authenticate(password)?;
    }

    let report = session.read_all();
    if !report.is_complete() {
        warn!("read failed - partial data in image");
    }
    out.write_all(session.image().byte_range(range.start, range.stop))?;
    out.write_all(b"\n")?;
    out.flush()?;

    if let Some(path) = &args.dump {
        fs::write(path, session.image().as_bytes())?;
        info!("{} bytes written to {}", session.image().active_len(), path.display());
    }

    if let Some(path) = &args.restore {
        let dump = fs::read(path)?;
        let image = PageImage::from_dump(session.variant(), &dump)?;
        session.load_image(image)?;
        let policy = resolve_policy(args, session.variant(), confirm)?;
        session.write_all(policy)?;
    }

    info!("Done.");
    Ok(())
}
