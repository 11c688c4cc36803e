use embedded_graphics::pixelcolor::Rgb888;
use image::Rgba;

pub const BLACK: Rgb888 = Rgb888::new(0, 0, 0);
pub const GREY: Rgb888 = Rgb888::new(128, 128, 128);

pub const COLOUR_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const COLOUR_TEXT: Rgb888 = BLACK;
pub const COLOUR_PLACEHOLDER: Rgb888 = GREY;

const ALTITUDE_CEILING_FT: f64 = 40000.0;
const DISTANCE_FADE_KM: f64 = 100.0;
const SPEED_CEILING_KT: f64 = 600.0;

// Low aircraft are drawn in strong red, fading towards black with altitude
pub fn altitude_colour(altitude_ft: i32) -> Rgb888 {
    Rgb888::new(channel(255.0, 1.0 - altitude_ft as f64 / ALTITUDE_CEILING_FT), 0, 0)
}

pub fn distance_colour(distance_km: f64) -> Rgb888 {
    Rgb888::new(channel(255.0, 1.0 - distance_km / DISTANCE_FADE_KM), 0, 0)
}

pub fn speed_colour(speed_kt: f64) -> Rgb888 {
    Rgb888::new(0, channel(200.0, speed_kt / SPEED_CEILING_KT), 0)
}

fn channel(max: f64, fraction: f64) -> u8 {
    (max * fraction.max(0.0).min(1.0)) as u8
}
