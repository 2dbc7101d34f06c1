use crate::cache::CacheHandle;
use crate::capabilities::Capabilities;
use crate::extract::extract_license;
use crate::license_checker::is_accepted;
use crate::package::PackageRef;
use crate::pypi_api::{fetch_package_info, Registry};
use crate::report::display;
use std::collections::HashMap;
use std::error::Error;
use std::io::Write;

/// Orchestrates one run: cache lookup, fetch/extract on misses, one report
/// line per package, delta write-back at the end.
///
/// The registry and the output sink are injected so tests run without a
/// network or a real stdout.
pub struct Driver<'a> {
    registry: &'a dyn Registry,
    out: &'a mut dyn Write,
    caps: Capabilities,
}

impl<'a> Driver<'a> {
    pub fn new(registry: &'a dyn Registry, out: &'a mut dyn Write, caps: Capabilities) -> Self {
        Driver { registry, out, caps }
    }

    /// Process `installed` in enumeration order against `cache`.
    ///
    /// Cache hits reuse the stored license text verbatim and never touch the
    /// registry. Only newly resolved entries are written back.
    pub fn run(
        &mut self,
        installed: &[PackageRef],
        cache: CacheHandle
    ) -> Result<(), Box<dyn Error>> {
        let known = cache.read_all()?;
        let mut delta: HashMap<PackageRef, String> = HashMap::new();

        for pkg in installed {
            let license = match known.get(pkg) {
                Some(cached) => cached.clone(),
                None => {
                    let info = fetch_package_info(self.registry, &pkg.name, &pkg.version)?;
                    let license = extract_license(&info);
                    delta.insert(pkg.clone(), license.clone());
                    license
                }
            };

            let ok = is_accepted(&license);
            display(self.out, &pkg.name, &pkg.version, &license, ok, self.caps.color)?;
        }

        cache.write_all(&delta)
    }
}
