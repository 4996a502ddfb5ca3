//! Static directory of Jan Aushadhi kendras

use super::Kendra;
use lazy_static::lazy_static;

fn entry(name: &str, address: &str, city: &str, lat: f64, lng: f64) -> Kendra {
    Kendra {
        name: name.to_string(),
        address: address.to_string(),
        city: city.to_string(),
        lat,
        lng,
        distance: None,
    }
}

lazy_static! {
    static ref KENDRAS: Vec<Kendra> = vec![
        entry(
            "Jan Aushadhi Kendra - Connaught Place",
            "Shop No. 5, Palika Bazar, Connaught Place",
            "Delhi",
            28.6315,
            77.2167
        ),
        entry(
            "Jan Aushadhi Kendra - Andheri",
            "Shop 12, Andheri West, Near Station",
            "Mumbai",
            19.1197,
            72.8468
        ),
        entry(
            "Jan Aushadhi Kendra - Jayanagar",
            "No. 44, 4th Block, Jayanagar",
            "Bangalore",
            12.9250,
            77.5938
        ),
        entry(
            "Jan Aushadhi Kendra - Salt Lake",
            "CF-123, Sector 1, Salt Lake",
            "Kolkata",
            22.5867,
            88.4172
        ),
        entry(
            "Jan Aushadhi Kendra - T Nagar",
            "Shop 8, North Usman Road, T Nagar",
            "Chennai",
            13.0446,
            80.2337
        ),
        entry(
            "Jan Aushadhi Kendra - Ameerpet",
            "7-1-21, Ameerpet Main Road",
            "Hyderabad",
            17.4374,
            78.4487
        ),
        entry(
            "Jan Aushadhi Kendra - Shivajinagar",
            "Shop 3, FC Road, Shivajinagar",
            "Pune",
            18.5308,
            73.8470
        ),
        entry(
            "Jan Aushadhi Kendra - Maninagar",
            "12, Rambagh Road, Maninagar",
            "Ahmedabad",
            22.9960,
            72.6030
        ),
        entry(
            "Jan Aushadhi Kendra - Malviya Nagar",
            "B-14, Malviya Nagar Market",
            "Jaipur",
            26.8570,
            75.8130
        ),
        entry(
            "Jan Aushadhi Kendra - Hazratganj",
            "21, MG Marg, Hazratganj",
            "Lucknow",
            26.8540,
            80.9460
        ),
        entry(
            "Jan Aushadhi Kendra - Kankarbagh",
            "Shop 9, Main Road, Kankarbagh",
            "Patna",
            25.5860,
            85.1580
        ),
        entry(
            "Jan Aushadhi Kendra - MP Nagar",
            "Zone II, MP Nagar",
            "Bhopal",
            23.2330,
            77.4340
        ),
    ];
}

/// The full static kendra directory, read-only for the process lifetime
pub fn kendra_directory() -> &'static [Kendra] {
    &KENDRAS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_supports_top_ten() {
        assert!(kendra_directory().len() > 10);
    }

    #[test]
    fn test_directory_coordinates_are_set() {
        for kendra in kendra_directory() {
            assert!(kendra.lat != 0.0 && kendra.lng != 0.0, "{}", kendra.name);
            assert!(kendra.distance.is_none());
        }
    }
}
