use serde::Deserialize;

// Wire format of the callsign lookup API

#[derive(Debug, Clone, Deserialize)]
pub struct CallsignEnvelope {
    pub response: CallsignResponse
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CallsignResponse {
    Route { flightroute: FlightRoute },
    Message(String)                         // e.g. "unknown callsign"
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlightRoute {
    pub airline: Option<RouteAirline>,
    pub origin: Option<RouteAirport>,
    pub destination: Option<RouteAirport>
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteAirline {
    pub name: Option<String>,
    pub icao: Option<String>,
    pub iata: Option<String>
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteAirport {
    pub iata_code: Option<String>,
    pub icao_code: Option<String>,
    pub name: Option<String>,
    pub municipality: Option<String>
}

// Domain types

#[derive(Debug, Clone, PartialEq)]
pub struct Airport {
    pub code: String,
    pub name: Option<String>
}

/// Airline and route for a callsign. Each part may be unknown independently.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo {
    pub airline: Option<String>,
    pub airline_icao: Option<String>,
    pub origin: Option<Airport>,
    pub destination: Option<Airport>
}

impl RouteAirport {
    /// IATA code preferred, ICAO otherwise. No usable code means no airport.
    fn into_airport(self) -> Option<Airport> {
        let code = non_blank(self.iata_code).or_else(|| non_blank(self.icao_code))?
            .to_ascii_uppercase();

        Some(Airport { code, name: non_blank(self.name).or_else(|| non_blank(self.municipality)) })
    }
}

impl FlightRoute {
    /// None only when the response carries nothing the panel can show
    pub fn into_route_info(self) -> Option<RouteInfo> {
        let (airline, airline_icao) = match self.airline {
            Some(a) => (non_blank(a.name), non_blank(a.icao).or_else(|| non_blank(a.iata))),
            None => (None, None)
        };

        let route = RouteInfo {
            airline,
            airline_icao,
            origin: self.origin.and_then(RouteAirport::into_airport),
            destination: self.destination.and_then(RouteAirport::into_airport)
        };

        let empty = route.airline.is_none() && route.airline_icao.is_none()
            && route.origin.is_none() && route.destination.is_none();
        if empty { None } else { Some(route) }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
