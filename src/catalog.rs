//! Built-in satellite database so the binary works with no input files.
//! Element sets are a fixed snapshot; they are meant for offline use and
//! demos, not for current-epoch accuracy.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SatelliteDetails {
    pub kind: &'static str,
    pub owner: &'static str,
    pub launched: u16,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub line1: &'static str,
    pub line2: &'static str,
    pub details: SatelliteDetails,
}

static ENTRIES: [CatalogEntry; 6] = [
    CatalogEntry {
        name: "ISS (ZARYA)",
        line1: "1 25544U 98067A   24032.54415809  .00016717  00000+0  30616-3 0  9997",
        line2: "2 25544  51.6416  57.8136 0004977 341.6433 130.6403 15.49842609437634",
        details: SatelliteDetails {
            kind: "Space Station",
            owner: "International",
            launched: 1998,
        },
    },
    CatalogEntry {
        name: "CARTOSAT-3",
        line1: "1 44793U 19081A   24032.19326499  .00000213  00000+0  10332-4 0  9998",
        line2: "2 44793  97.4154 262.4282 0001369  84.3218 275.8291 15.19973238217350",
        details: SatelliteDetails {
            kind: "Earth Observation",
            owner: "ISRO (India)",
            launched: 2019,
        },
    },
    CatalogEntry {
        name: "EOS-04",
        line1: "1 51656U 22013A   24031.48291234  .00000521  00000+0  38219-4 0  9998",
        line2: "2 51656  97.9182 143.2182 0001567  98.1234 262.1123 14.82193218231202",
        details: SatelliteDetails {
            kind: "Radar Imaging",
            owner: "ISRO (India)",
            launched: 2022,
        },
    },
    CatalogEntry {
        name: "HUBBLE ST",
        line1: "1 20580U 90037B   24032.38291823  .00001231  00000+0  10000-3 0  9991",
        line2: "2 20580  28.4698 322.1823 0002341  98.1234 182.4321 15.09218321932188",
        details: SatelliteDetails {
            kind: "Telescope",
            owner: "NASA/ESA",
            launched: 1990,
        },
    },
    CatalogEntry {
        name: "LANDSAT 8",
        line1: "1 39084U 13008A   24032.12391283  .00000123  00000+0  10231-4 0  9992",
        line2: "2 39084  98.2123 123.1231 0001231  89.1231 270.1231 14.57123912391234",
        details: SatelliteDetails {
            kind: "Earth Observation",
            owner: "NASA/USGS",
            launched: 2013,
        },
    },
    CatalogEntry {
        name: "TIANGONG",
        line1: "1 48274U 21035A   24032.58291234  .00023121  00000+0  10000-3 0  9993",
        line2: "2 48274  41.4698 123.1823 0005431  98.1234 182.4321 15.49218321932189",
        details: SatelliteDetails {
            kind: "Space Station",
            owner: "China",
            launched: 2021,
        },
    },
];

pub fn entries() -> &'static [CatalogEntry] {
    &ENTRIES
}

/// Exact-name match first, then case-insensitive substring so "hubble"
/// or "EOS" still resolve.
pub fn lookup(name: &str) -> Option<&'static CatalogEntry> {
    if let Some(entry) = ENTRIES.iter().find(|e| e.name == name) {
        return Some(entry);
    }

    let needle = name.to_uppercase();
    ENTRIES.iter().find(|e| e.name.contains(&needle))
}
