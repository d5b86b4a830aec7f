//! The pure predicate deciding whether a cached build is still valid.

use carton_package::PackageMap;

use crate::buildinfo::BuildInfo;

/// Returns `true` iff a previously built artifact can be reused.
///
/// Three conditions, conjoined with short-circuit evaluation, cheapest
/// first:
/// 1. A build-info sidecar exists (`None` is a definitive cache miss).
/// 2. The current map is a superset of the recorded plugin-provider
///    snapshot — no provider changed version or location.
/// 3. Every watch condition recorded at build time (plugin-level merged
///    with every per-unit set) still holds on the filesystem.
pub fn is_up_to_date(build_info: Option<&BuildInfo>, map: &PackageMap) -> bool {
    let Some(info) = build_info else {
        return false;
    };
    if !map.is_superset_of_snapshot(&info.plugin_providers) {
        return false;
    }
    info.merged_watch_set().is_up_to_date()
}
