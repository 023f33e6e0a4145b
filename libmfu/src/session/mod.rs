// libmfu-rs/libmfu/src/session/mod.rs

//! Session context: one reader, at most one selected tag, and everything
//! learned about that tag during the run.

pub mod operations;
pub mod raw;

pub use raw::RawMode;

use std::ops::Range;
use std::thread;
use std::time::Duration;

use log::{debug, info};

use crate::constants::{MAX_TARGET_COUNT, PAGE_SIZE};
use crate::driver::{Driver, Property};
use crate::image::PageImage;
use crate::policy::WritePolicy;
use crate::tag::TagVariant;
use crate::types::{Credentials, Pack, Password, TargetInfo, Uid};
use crate::utils::default_poll_interval;
use crate::{Error, Result};

use operations::{ReadReport, WriteReport};

/// Runtime knobs of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Only select the target with this UID
    pub uid_filter: Option<Uid>,
    /// Delay between selection attempts in [`Session::wait_for_tag`]
    pub poll_interval: Duration,
    /// Upper bound for [`Session::list_targets`]
    pub max_targets: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            uid_filter: None,
            poll_interval: default_poll_interval(),
            max_targets: MAX_TARGET_COUNT,
        }
    }
}

/// Session owns the driver, the selected target, the detected variant,
/// the known credentials and the page image.
pub struct Session<D: Driver> {
    driver: D,
    config: SessionConfig,
    target: Option<TargetInfo>,
    variant: TagVariant,
    credentials: Credentials,
    image: PageImage,
}

impl<D: Driver> Session<D> {
    /// Put the reader into initiator mode and make selection try only once.
    pub fn open(mut driver: D, config: SessionConfig) -> Result<Self> {
        driver.initiator_init()?;
        driver.set_property(Property::InfiniteSelect, false)?;
        let variant = TagVariant::default();
        Ok(Self {
            driver,
            config,
            target: None,
            variant,
            credentials: Credentials::default(),
            image: PageImage::for_variant(variant),
        })
    }

    /// Runtime knobs given at open.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Underlying reader driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Underlying reader driver, mutably.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Give the driver back, ending the session.
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Currently selected target, if any.
    pub fn target(&self) -> Option<&TargetInfo> {
        self.target.as_ref()
    }

    /// Variant found by [`Session::detect_variant`].
    pub fn variant(&self) -> TagVariant {
        self.variant
    }

    /// Password and pack learned from authentication.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Page image of the current tag.
    pub fn image(&self) -> &PageImage {
        &self.image
    }

    /// Page image of the current tag, mutably.
    pub fn image_mut(&mut self) -> &mut PageImage {
        &mut self.image
    }

    /// Replace the image, e.g. with a dump to restore. The image must match
    /// the detected variant.
    pub fn load_image(&mut self, image: PageImage) -> Result<()> {
        if image.pages() != self.variant.pages() {
            return Err(Error::InvalidLength {
                expected: self.variant.pages() * PAGE_SIZE,
                actual: image.active_len(),
            });
        }
        self.image = image;
        Ok(())
    }

    /// Enumerate the ISO14443-A targets in the field.
    pub fn list_targets(&mut self) -> Result<Vec<TargetInfo>> {
        let targets = self.driver.list_passive_targets(self.config.max_targets)?;
        if !targets.is_empty() {
            info!("{} ISO14443A passive target(s) found:", targets.len());
        }
        for t in &targets {
            info!("\t{}", t.uid);
        }
        Ok(targets)
    }

    /// Select one target, honouring the configured UID filter.
    pub fn select(&mut self) -> Result<TargetInfo> {
        let filter = self.config.uid_filter;
        self.select_uid(filter.as_ref())?.ok_or(Error::NoTag)
    }

    /// Poll until a target shows up. Failed selections from the reader are
    /// retried like empty ones.
    pub fn wait_for_tag(&mut self) -> Result<TargetInfo> {
        let filter = self.config.uid_filter;
        let mut announced = false;
        loop {
            match self.select_uid(filter.as_ref()) {
                Ok(Some(target)) => return Ok(target),
                Ok(None) => {}
                Err(e) if e.is_transport() => debug!("selection failed: {}", e),
                Err(e) => return Err(e),
            }
            if !announced {
                info!("waiting for tag...");
                announced = true;
            }
            thread::sleep(self.config.poll_interval);
        }
    }

    /// Re-run selection of the current tag after a failed exchange left it
    /// halted.
    pub fn reselect(&mut self) -> Result<TargetInfo> {
        let uid = self.target.map(|t| t.uid).or(self.config.uid_filter);
        self.select_uid(uid.as_ref())?.ok_or(Error::NoTag)
    }

    fn select_uid(&mut self, uid: Option<&Uid>) -> Result<Option<TargetInfo>> {
        let found = self.driver.select_passive_target(uid)?;
        if let Some(target) = found {
            debug!(
                "selected target {} (atqa {:02x}{:02x})",
                target.uid, target.atqa[0], target.atqa[1]
            );
            self.target = Some(target);
        }
        Ok(found)
    }

    /// Reject targets that do not answer with the Ultralight ATQA.
    pub fn check_ultralight(&self) -> Result<&TargetInfo> {
        let target = self.target.as_ref().ok_or(Error::NoTag)?;
        if !target.is_ultralight() {
            return Err(Error::NotUltralight {
                atqa0: target.atqa[0],
                atqa1: target.atqa[1],
            });
        }
        Ok(target)
    }

    /// Classify the selected tag and size the image for it.
    pub fn detect_variant(&mut self) -> Result<TagVariant> {
        operations::detect_variant(self)
    }

    /// Authenticate with `password`; the returned pack is kept as a credential.
    pub fn authenticate(&mut self, password: Password) -> Result<Pack> {
        operations::authenticate(self, password)
    }

    /// Read every page of the detected variant into the image.
    pub fn read_all(&mut self) -> ReadReport {
        operations::read_all(self)
    }

    /// Write the image back to the tag.
    pub fn write_all(&mut self, policy: WritePolicy) -> Result<WriteReport> {
        operations::write_all(self, policy)
    }

    /// Write a page range of the image; no magic unlock is attempted.
    pub fn write_pages(&mut self, policy: WritePolicy, pages: Range<usize>) -> Result<WriteReport> {
        operations::write_pages(self, policy, pages)
    }

    /// Make the UID pages writable: plain DirectWrite first, then the backdoor.
    pub fn ensure_writable(&mut self) -> Result<bool> {
        operations::ensure_writable(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{Call, MockDriver};

    fn session(mock: MockDriver) -> Session<MockDriver> {
        Session::open(mock, SessionConfig::default()).unwrap()
    }

    #[test]
    fn open_inits_and_disables_infinite_select() {
        let s = session(MockDriver::new(TagVariant::Ntag213));
        assert_eq!(
            s.driver().calls,
            vec![
                Call::InitiatorInit,
                Call::SetProperty(Property::InfiniteSelect, false)
            ]
        );
        assert!(s.target().is_none());
    }

    #[test]
    fn select_without_tag_is_no_tag() {
        let mut mock = MockDriver::new(TagVariant::Ntag213);
        mock.present = false;
        let mut s = session(mock);
        assert!(matches!(s.select(), Err(Error::NoTag)));
    }

    #[test]
    fn select_honours_uid_filter() {
        let mut s = Session::open(
            MockDriver::new(TagVariant::Ntag213),
            SessionConfig {
                uid_filter: Some("04aabbccddeeff".parse().unwrap()),
                ..SessionConfig::default()
            },
        )
        .unwrap();
        assert!(matches!(s.select(), Err(Error::NoTag)));

        s.config.uid_filter = Some("04010203040506".parse().unwrap());
        let t = s.select().unwrap();
        assert_eq!(t.uid.to_hex(), "04010203040506");
    }

    #[test]
    fn wait_for_tag_polls_until_present() {
        let mut mock = MockDriver::new(TagVariant::UltralightOriginal);
        mock.select_failures = 3;
        let mut s = Session::open(
            mock,
            SessionConfig {
                poll_interval: Duration::from_millis(1),
                ..SessionConfig::default()
            },
        )
        .unwrap();
        s.wait_for_tag().unwrap();
        assert_eq!(s.driver().count(|c| *c == Call::Select), 4);
    }

    #[test]
    fn wait_for_tag_retries_failed_selections() {
        let mut mock = MockDriver::new(TagVariant::Ntag213);
        mock.select_errors = 2;
        let mut s = Session::open(
            mock,
            SessionConfig {
                poll_interval: Duration::from_millis(1),
                ..SessionConfig::default()
            },
        )
        .unwrap();
        let t = s.wait_for_tag().unwrap();
        assert_eq!(s.target(), Some(&t));
        assert_eq!(s.driver().count(|c| *c == Call::Select), 3);
    }

    #[test]
    fn atqa_check() {
        let mut s = session(MockDriver::new(TagVariant::Ntag213));
        assert!(matches!(s.check_ultralight(), Err(Error::NoTag)));
        s.select().unwrap();
        assert!(s.check_ultralight().is_ok());

        let mut s = session(MockDriver::new(TagVariant::Ntag213).with_atqa([0x00, 0x04]));
        s.select().unwrap();
        assert!(matches!(
            s.check_ultralight(),
            Err(Error::NotUltralight { atqa0: 0x00, atqa1: 0x04 })
        ));
    }

    #[test]
    fn list_targets_respects_max() {
        let mut s = session(MockDriver::new(TagVariant::Ntag213));
        assert_eq!(s.list_targets().unwrap().len(), 1);
        s.config.max_targets = 0;
        assert!(s.list_targets().unwrap().is_empty());
    }

    #[test]
    fn load_image_checks_variant() {
        let mut s = session(MockDriver::new(TagVariant::Ntag213));
        assert!(s.load_image(PageImage::for_variant(TagVariant::Ntag213)).is_err());
        assert!(s
            .load_image(PageImage::for_variant(TagVariant::UltralightOriginal))
            .is_ok());
    }
}
