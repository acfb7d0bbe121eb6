//! Zones — timezone listing for the preference boundary.

use std::collections::HashSet;

use chrono_tz::TZ_VARIANTS;

/// Zones surfaced right after the local zone, in display order.
pub const COMMON_TIMEZONES: &[&str] = &[
    "UTC",
    "America/New_York",
    "America/Chicago",
    "America/Denver",
    "America/Los_Angeles",
    "America/Anchorage",
    "Pacific/Honolulu",
    "America/Sao_Paulo",
    "Europe/London",
    "Europe/Paris",
    "Europe/Berlin",
    "Europe/Amsterdam",
    "Europe/Moscow",
    "Asia/Dubai",
    "Asia/Kolkata",
    "Asia/Singapore",
    "Asia/Shanghai",
    "Asia/Tokyo",
    "Asia/Seoul",
    "Australia/Sydney",
    "Australia/Melbourne",
    "Australia/Perth",
    "Pacific/Auckland",
];

/// IANA name of the process-local timezone, if the platform reports one.
pub fn local_timezone() -> Option<String> {
    iana_time_zone::get_timezone().ok().filter(|tz| !tz.is_empty())
}

/// Ordered, deduplicated list of selectable timezones: `local` first, then
/// [`COMMON_TIMEZONES`], then every other zone in the tz database in
/// alphabetical order.
pub fn list_timezones(local: Option<&str>) -> Vec<String> {
    let mut all: Vec<&str> = TZ_VARIANTS.iter().map(|tz| tz.name()).collect();
    all.sort_unstable();

    let mut seen = HashSet::new();
    let mut zones = Vec::with_capacity(all.len() + 1);

    let surfaced = local.into_iter().chain(COMMON_TIMEZONES.iter().copied());
    for zone in surfaced.chain(all) {
        if !zone.is_empty() && seen.insert(zone.to_string()) {
            zones.push(zone.to_string());
        }
    }

    zones
}
