//! Uncompressed APRS position fields
//!
//! Latitude is written as `DDMM.mmN`, longitude as `DDDMM.mmE`, with minutes
//! rounded to hundredths before the degree/minute split so `59.999'` never
//! renders as `60.00`.

fn degrees_minutes(value: f64) -> (u64, f64) {
    let hundredths = (value.abs() * 60.0 * 100.0).round() as u64;
    (hundredths / 6000, (hundredths % 6000) as f64 / 100.0)
}

/// Format a latitude in decimal degrees as `DDMM.mm[N|S]`
pub fn create_lat_aprs(lat: f64) -> String {
    let hemisphere = if lat < 0.0 { 'S' } else { 'N' };
    let (degrees, minutes) = degrees_minutes(lat);
    format!("{:02}{:05.2}{}", degrees, minutes, hemisphere)
}

/// Format a longitude in decimal degrees as `DDDMM.mm[E|W]`
pub fn create_long_aprs(lng: f64) -> String {
    let hemisphere = if lng < 0.0 { 'W' } else { 'E' };
    let (degrees, minutes) = degrees_minutes(lng);
    format!("{:03}{:05.2}{}", degrees, minutes, hemisphere)
}

/// Beacon body in APRS position-report syntax (`=` no messaging, `L` table, `&` igate symbol)
pub fn beacon_body(lat: f64, lng: f64, message: &str) -> String {
    format!(
        "={}L{}&{}",
        create_lat_aprs(lat),
        create_long_aprs(lng),
        message
    )
}
