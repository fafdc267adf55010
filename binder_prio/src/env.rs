//! Environment Detector
//!
//! Один раз при init ищем файл-маркер прошивки. Повторно не проверяем:
//! вариант, найденный при загрузке, действует до выгрузки модуля.
//! Looked up once at init for the ROM marker file. Never re-checked: the variant
//! found at load time holds until the module is unloaded.

use libbinder::Result;

use crate::rules::RuleGroups;

/// Вариант прошивки / ROM flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Aosp,
    Miui,
}

impl Variant {
    pub const fn rule_groups(self) -> RuleGroups {
        match self {
            Variant::Aosp => RuleGroups::BASE,
            Variant::Miui => RuleGroups::all(),
        }
    }

    pub const fn is_miui(self) -> bool { matches!(self, Variant::Miui) }

    pub const fn name(self) -> &'static str {
        match self {
            Variant::Aosp => "AOSP",
            Variant::Miui => "Miui/HyperOS",
        }
    }
}

/// Разрешение пути (kern_path с LOOKUP_FOLLOW).
/// Path resolution (kern_path with LOOKUP_FOLLOW).
pub trait PathLookup {
    fn lookup(&self, path: &str) -> Result<()>;
}

impl<F> PathLookup for F
where
    F: Fn(&str) -> Result<()>,
{
    fn lookup(&self, path: &str) -> Result<()> { self(path) }
}

/// Есть маркер → Miui; нет или ошибка → AOSP. Init не прерывается.
/// Marker present → Miui; absent or any error → AOSP. Never fails init.
pub fn detect<P: PathLookup + ?Sized>(paths: &P, marker: &str) -> Variant {
    match paths.lookup(marker) {
        Ok(()) => Variant::Miui,
        Err(err) => {
            pr_debug!("{}: {}", marker, err);
            Variant::Aosp
        }
    }
}

/// Проба через std::fs; metadata следует по симлинкам.
/// Lookup over std::fs; metadata follows symlinks.
#[cfg(any(test, feature = "std"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct StdLookup;

#[cfg(any(test, feature = "std"))]
impl PathLookup for StdLookup {
    fn lookup(&self, path: &str) -> Result<()> {
        use libbinder::Error;
        use std::io::ErrorKind;

        std::fs::metadata(path).map(|_| ()).map_err(|err| match err.kind() {
            ErrorKind::NotFound         => Error::NotFound,
            ErrorKind::PermissionDenied => Error::NoPermission,
            ErrorKind::InvalidInput     => Error::InvalidArg,
            _                           => Error::Io,
        })
    }
}
