//! Common test fixtures for projection tests.
//!
//! Reference values were computed independently of this workspace and are
//! accurate to well below a meter.

/// Planet approximations as (major_semiaxis, minor_semiaxis) in meters.
pub mod ellipsoids {
    /// Sphere used by WRF/CMAQ modeling grids
    pub const MODELING_SPHERE: (f64, f64) = (6_370_000.0, 6_370_000.0);

    /// WGS84
    pub const WGS84: (f64, f64) = (6_378_137.0, 6_356_752.314_245_179);

    /// GRS80, differs from WGS84 only in the sub-millimeter range
    pub const GRS80: (f64, f64) = (6_378_137.0, 6_356_752.314_140_356);

    /// Minor axis larger than major, always rejected
    pub const INVERTED: (f64, f64) = (6_356_752.0, 6_378_137.0);

    /// Every valid ellipsoid above, sphere first.
    pub const ALL: [(f64, f64); 3] = [MODELING_SPHERE, WGS84, GRS80];
}

/// Projection headers in the two-line ASCII layout.
pub mod headers {
    /// CMAQ/WRF continental US Lambert grid
    pub const LCC_CONUS: &str = "# lcc projection: lat_1 lat_2 lat_0 lon_0 major_semiaxis minor_semiaxis\n\
                                 33 45 40 -97 6370000 6370000\n";

    /// North polar stereographic, true at 45°N
    pub const STEREOGRAPHIC_NORTH: &str = "# stereographic projection: lon_0 lat_0 lat_sec major_semiaxis minor_semiaxis\n\
                                           -98 90 45 6370000 6370000\n";

    pub const MERCATOR: &str = "# mercator projection: lon_0 major_semiaxis minor_semiaxis\n\
                                -97 6370000 6370000\n";

    pub const LONLAT: &str = "# lonlat projection: major_semiaxis minor_semiaxis\n\
                              6370000 6370000\n";

    /// Header followed by unrelated data lines
    pub const MERCATOR_WITH_DATA: &str = "# mercator projection: lon_0 major_semiaxis minor_semiaxis\n\
                                          -100 6378137 6356752.314245179\n\
                                          # data\n\
                                          1 2 3 4 5\n";

    /// Lambert parallels in the wrong order
    pub const LCC_INVERTED_PARALLELS: &str = "# lcc projection: lat_1 lat_2 lat_0 lon_0 major_semiaxis minor_semiaxis\n\
                                              50 30 40 -97 6370000 6370000\n";

    /// Mercator header missing the minor semiaxis
    pub const MERCATOR_SHORT: &str = "# mercator projection: lon_0 major_semiaxis minor_semiaxis\n\
                                      -97 6370000\n";
}

/// Sample geographic points as (longitude, latitude) in degrees.
pub mod points {
    /// Research Triangle Park, North Carolina
    pub const RTP: (f64, f64) = (-78.7268, 35.9611);

    /// RTP projected with `headers::LCC_CONUS`
    pub const RTP_LCC_CONUS: (f64, f64) = (1_626_753.623, -282_642.232);

    /// RTP projected with Mercator, lon_0 = -100, on the modeling sphere
    pub const RTP_MERCATOR_LON_100: (f64, f64) = (2_365_100.626, 4_289_790.359);

    /// Spread over the continental US
    pub const CONUS: [(f64, f64); 6] = [
        (-124.0, 48.5),
        (-117.16, 32.72),
        (-97.0, 40.0),
        (-87.63, 41.88),
        (-80.19, 25.76),
        (-69.0, 45.0),
    ];

    /// Arctic points for polar grids
    pub const ARCTIC: [(f64, f64); 4] = [
        (-150.0, 70.0),
        (-40.0, 72.0),
        (20.0, 78.0),
        (100.0, 65.0),
    ];

    /// Antarctic points for south polar grids
    pub const ANTARCTIC: [(f64, f64); 4] = [
        (-150.0, -70.0),
        (-40.0, -72.0),
        (20.0, -78.0),
        (100.0, -65.0),
    ];

    /// Exactly on a pole or the ±180° meridian
    pub const DEGENERATE: [(f64, f64); 6] = [
        (0.0, 90.0),
        (0.0, -90.0),
        (180.0, 0.0),
        (-180.0, 0.0),
        (180.0, 90.0),
        (-180.0, -90.0),
    ];
}

/// Common bounding boxes as (min_lon, min_lat, max_lon, max_lat).
pub mod bbox {
    /// Continental United States bounding box
    pub const CONUS: (f64, f64, f64, f64) = (-130.0, 20.0, -60.0, 55.0);

    /// Europe bounding box
    pub const EUROPE: (f64, f64, f64, f64) = (-15.0, 35.0, 45.0, 72.0);

    /// Global minus a one degree margin at the poles and the dateline
    pub const GLOBAL_INTERIOR: (f64, f64, f64, f64) = (-179.0, -89.0, 179.0, 89.0);
}
