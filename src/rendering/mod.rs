pub mod canvas;
pub mod colour;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_9X18, FONT_9X18_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use image::imageops::{self, FilterType};
use crate::data::aircraft::AircraftObservation;
use crate::data::flight::{Airport, RouteInfo};
use crate::errors::RenderError;
use crate::geo::coords::{km_to_miles, knots_to_mph};
use crate::rendering::canvas::Canvas;
use crate::sources::logos::LogoAsset;

pub type BackBuffer = image::ImageBuffer<image::Rgba<u8>, Vec<u8>>;

const PLACEHOLDER: &str = "N/A";
const NO_FLIGHTS: &str = "No flights nearby";

const MARGIN: i32 = 10;
const LOGO_BOX: (u32, u32) = (200, 60);

const HEADER_FONT: &MonoFont<'static> = &FONT_9X18_BOLD;
const HEADER_SCALE: u32 = 2;
const FIELD_FONT: &MonoFont<'static> = &FONT_10X20;
const ROUTE_FONT: &MonoFont<'static> = &FONT_9X18;

const HEADER_ADVANCE: i32 = 46;
const FIELD_ADVANCE: i32 = 30;
const ROUTE_ADVANCE: i32 = 25;

/// Composes the flight panel for a display of fixed size.
///
/// In portrait mode the panel is laid out with width and height swapped and
/// rotated a quarter turn counter-clockwise, so the returned buffer always has
/// the display's native dimensions.
#[derive(Debug, Clone)]
pub struct PanelRenderer {
    width: u32,
    height: u32,
    portrait: bool
}

impl PanelRenderer {
    pub fn new(width: u32, height: u32, portrait: bool) -> Self {
        Self { width, height, portrait }
    }

    pub fn dimensions(&self) -> (u32, u32) { (self.width, self.height) }

    fn layout_size(&self) -> (u32, u32) {
        if self.portrait { (self.height, self.width) } else { (self.width, self.height) }
    }

    pub fn render(&self, heading: &str, aircraft: Option<&AircraftObservation>, route: Option<&RouteInfo>,
                  logo: Option<&LogoAsset>, distance_km: Option<f64>) -> Result<BackBuffer, RenderError> {
        let (width, height) = self.layout_size();
        let mut canvas = Canvas::allocate(width, height, colour::COLOUR_BACKGROUND)?;
        let text_width = width.saturating_sub(2 * MARGIN as u32);

        let mut y = MARGIN;
        let heading = if heading.trim().is_empty() { PLACEHOLDER.to_string() } else { format!("{} Area", heading.trim()) };
        draw_text(&mut canvas, &heading, Point::new(MARGIN, y), HEADER_FONT, HEADER_SCALE, colour::COLOUR_TEXT, text_width)?;
        y += HEADER_ADVANCE;

        match aircraft {
            None => {
                draw_text(&mut canvas, NO_FLIGHTS, Point::new(MARGIN, y), FIELD_FONT, 1, colour::COLOUR_TEXT, text_width)?;
            },
            Some(aircraft) => {
                for (line, colour) in field_lines(aircraft, route, distance_km) {
                    draw_text(&mut canvas, &line, Point::new(MARGIN, y), FIELD_FONT, 1, colour, text_width)?;
                    y += FIELD_ADVANCE;
                }

                y += 5;
                let origin = route.and_then(|r| r.origin.as_ref());
                let destination = route.and_then(|r| r.destination.as_ref());
                for (label, airport) in [("From", origin), ("To", destination)] {
                    draw_text(&mut canvas, &airport_line(label, airport), Point::new(MARGIN, y), ROUTE_FONT, 1, colour::COLOUR_TEXT, text_width)?;
                    y += ROUTE_ADVANCE;
                }

                draw_logo(&mut canvas, logo)?;
            }
        }

        if self.portrait {
            canvas.into_rotated_counter_clockwise()
        } else {
            Ok(canvas.into_buffer())
        }
    }
}

fn field_lines(aircraft: &AircraftObservation, route: Option<&RouteInfo>, distance_km: Option<f64>) -> Vec<(String, Rgb888)> {
    let text = colour::COLOUR_TEXT;

    let airline = route.and_then(|r| r.airline.as_deref().or(r.airline_icao.as_deref())).unwrap_or(PLACEHOLDER);
    let aircraft_type = match (&aircraft.aircraft_type, &aircraft.registration) {
        (Some(t), Some(r)) => format!("{} ({})", t, r),
        (Some(v), None) | (None, Some(v)) => v.clone(),
        (None, None) => PLACEHOLDER.to_string()
    };

    let altitude = match aircraft.altitude_ft {
        _ if aircraft.on_ground => ("Altitude: Ground".to_string(), colour::altitude_colour(0)),
        Some(ft) => (format!("Altitude: {} ft", ft), colour::altitude_colour(ft)),
        None => (format!("Altitude: {}", PLACEHOLDER), colour::COLOUR_PLACEHOLDER)
    };

    let speed = match aircraft.ground_speed_kt {
        Some(kt) => (format!("Speed: {:.0} mph", knots_to_mph(kt)), colour::speed_colour(kt)),
        None => (format!("Speed: {}", PLACEHOLDER), colour::COLOUR_PLACEHOLDER)
    };

    let distance = match distance_km {
        Some(km) => (format!("Distance: {:.1} mi", km_to_miles(km)), colour::distance_colour(km)),
        None => (format!("Distance: {}", PLACEHOLDER), colour::COLOUR_PLACEHOLDER)
    };

    vec![
        (format!("Flight: {}", aircraft.callsign.as_deref().unwrap_or(PLACEHOLDER)), text),
        (format!("Airline: {}", airline), text),
        (format!("Type: {}", aircraft_type), text),
        altitude,
        speed,
        distance
    ]
}

fn airport_line(label: &str, airport: Option<&Airport>) -> String {
    match airport {
        Some(Airport { code, name: Some(name) }) => format!("{}: {} {}", label, code, name),
        Some(Airport { code, name: None }) => format!("{}: {}", label, code),
        None => format!("{}: {}", label, PLACEHOLDER)
    }
}

fn draw_logo(canvas: &mut Canvas, logo: Option<&LogoAsset>) -> Result<(), RenderError> {
    let (box_w, box_h) = LOGO_BOX;
    let x = canvas.width() as i32 - box_w as i32 - MARGIN;
    let y = canvas.height() as i32 - box_h as i32 - MARGIN;

    match logo {
        Some(logo) if logo.image.width() > 0 && logo.image.height() > 0 => {
            let (w, h) = fit_within(logo.image.dimensions(), LOGO_BOX);
            let fitted = imageops::resize(&logo.image, w, h, FilterType::Lanczos3);

            // Centre in the logo box
            let (ox, oy) = ((box_w - w) / 2, (box_h - h) / 2);
            canvas.overlay(&fitted, (x + ox as i32) as i64, (y + oy as i32) as i64);
        },
        _ => {
            Rectangle::new(Point::new(x, y), Size::new(box_w, box_h))
                .into_styled(PrimitiveStyle::with_stroke(colour::COLOUR_PLACEHOLDER, 1))
                .draw(canvas)?;

            let advance = (ROUTE_FONT.character_size.width + ROUTE_FONT.character_spacing) as i32;
            let label_x = x + (box_w as i32 - advance * 2) / 2;
            let label_y = y + (box_h as i32 - ROUTE_FONT.character_size.height as i32) / 2;
            draw_text(canvas, "--", Point::new(label_x, label_y), ROUTE_FONT, 1, colour::COLOUR_PLACEHOLDER, box_w)?;
        }
    }
    Ok(())
}

/// Largest size with the same aspect ratio that fits inside `bounds`
pub fn fit_within(size: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let scale = (bounds.0 as f64 / size.0 as f64).min(bounds.1 as f64 / size.1 as f64);
    let w = ((size.0 as f64 * scale).round() as u32).max(1).min(bounds.0);
    let h = ((size.1 as f64 * scale).round() as u32).max(1).min(bounds.1);
    (w, h)
}

fn draw_text(canvas: &mut Canvas, text: &str, at: Point, font: &MonoFont<'static>, scale: u32,
             colour: Rgb888, max_width: u32) -> Result<(), RenderError> {
    let advance = (font.character_size.width + font.character_spacing) * scale.max(1);
    let text = truncate(text, (max_width / advance.max(1)) as usize);

    let style = MonoTextStyle::new(font, colour);
    Text::with_baseline(&text, Point::zero(), style, Baseline::Top)
        .draw(&mut canvas.scaled(at, scale))?;
    Ok(())
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut out: String = text.chars().take(max_chars - 3).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::geography::GeoPosition;
    use crate::rendering::colour::COLOUR_BACKGROUND;

    fn aircraft() -> AircraftObservation {
        AircraftObservation {
            icao24: "a1b2c3".into(),
            callsign: Some("AAL123".into()),
            position: GeoPosition::new(30.7, -97.7),
            altitude_ft: Some(12000),
            on_ground: false,
            ground_speed_kt: Some(310.0),
            registration: Some("N123AA".into()),
            aircraft_type: Some("B738".into())
        }
    }

    fn route() -> RouteInfo {
        RouteInfo {
            airline: Some("American Airlines".into()),
            airline_icao: Some("AAL".into()),
            origin: Some(Airport { code: "AUS".into(), name: Some("Austin-Bergstrom International Airport".into()) }),
            destination: Some(Airport { code: "DFW".into(), name: None })
        }
    }

    fn logo(colour: [u8; 4]) -> LogoAsset {
        LogoAsset { airline: "American Airlines".into(), image: image::RgbaImage::from_pixel(100, 30, image::Rgba(colour)) }
    }

    #[test]
    fn test_empty_panel_has_display_dimensions() {
        for portrait in [false, true] {
            let renderer = PanelRenderer::new(600, 448, portrait);
            let buffer = renderer.render("", None, None, None, None).unwrap();
            assert_eq!(buffer.dimensions(), (600, 448));
            assert!(buffer.pixels().any(|p| *p != COLOUR_BACKGROUND));
        }
    }

    #[test]
    fn test_full_panel() {
        let renderer = PanelRenderer::new(600, 448, false);
        let logo = logo([0, 0, 255, 255]);
        let buffer = renderer.render("Austin", Some(&aircraft()), Some(&route()), Some(&logo), Some(8.3)).unwrap();

        assert_eq!(buffer.dimensions(), (600, 448));
        // Logo is scaled into the bottom-right box
        let centre = buffer.get_pixel(600 - 10 - 100, 448 - 10 - 30);
        assert!(centre[2] > 200 && centre[0] < 50, "pixel was {:?}", centre);
    }

    #[test]
    fn test_missing_route_and_logo_use_placeholders() {
        let renderer = PanelRenderer::new(448, 600, false);
        let mut bare = aircraft();
        bare.callsign = None;
        bare.altitude_ft = None;
        bare.ground_speed_kt = None;

        let buffer = renderer.render("Houston", Some(&bare), None, None, None).unwrap();
        assert_eq!(buffer.dimensions(), (448, 600));

        // Placeholder logo box outline
        let grey = image::Rgba([128, 128, 128, 255]);
        assert_eq!(*buffer.get_pixel(448 - 10 - 200, 600 - 10 - 60), grey);
        assert_eq!(*buffer.get_pixel(448 - 10 - 1, 600 - 10 - 1), grey);
    }

    #[test]
    fn test_field_lines() {
        let lines = field_lines(&aircraft(), Some(&route()), Some(10.0));
        let text: Vec<&str> = lines.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(text, vec![
            "Flight: AAL123",
            "Airline: American Airlines",
            "Type: B738 (N123AA)",
            "Altitude: 12000 ft",
            "Speed: 357 mph",
            "Distance: 6.2 mi"
        ]);

        let mut grounded = aircraft();
        grounded.on_ground = true;
        assert_eq!(field_lines(&grounded, None, None)[3].0, "Altitude: Ground");
        assert_eq!(field_lines(&grounded, None, None)[1].0, "Airline: N/A");

        let mut unnamed = route();
        unnamed.airline = None;
        assert_eq!(field_lines(&aircraft(), Some(&unnamed), None)[1].0, "Airline: AAL");
    }

    #[test]
    fn test_airport_line() {
        assert_eq!(airport_line("To", route().destination.as_ref()), "To: DFW");
        assert_eq!(airport_line("From", None), "From: N/A");
    }

    #[test]
    fn test_fit_within() {
        assert_eq!(fit_within((100, 30), (200, 60)), (200, 60));
        assert_eq!(fit_within((400, 400), (200, 60)), (60, 60));
        assert_eq!(fit_within((1000, 10), (200, 60)), (200, 2));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Austin", 10), "Austin");
        assert_eq!(truncate("Dallas/Fort Worth Area", 10), "Dallas/...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
