//! Countries and cities offered by the quote form

use serde::Serialize;

/// A country the form can ship from or to, with its selectable cities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    /// Form value, e.g. `"usa"`
    pub code: String,
    pub cities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityCatalog {
    countries: Vec<Country>,
}

impl CityCatalog {
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(|c| c.code.as_str())
    }

    /// Cities for a country; empty for unknown countries.
    pub fn cities(&self, country: &str) -> &[String] {
        self.countries
            .iter()
            .find(|c| c.code == country)
            .map(|c| c.cities.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `slug` (see [`city_slug`]) names a city of `country`.
    pub fn contains_city(&self, country: &str, slug: &str) -> bool {
        self.cities(country).iter().any(|city| city_slug(city) == slug)
    }
}

impl Default for CityCatalog {
    fn default() -> Self {
        let table: [(&str, [&str; 5]); 10] = [
            ("china", ["Shanghai", "Beijing", "Guangzhou", "Shenzhen", "Tianjin"]),
            ("usa", ["Miami", "Los Angeles", "New York", "Houston", "Chicago"]),
            ("germany", ["Hamburg", "Bremen", "Berlin", "Munich", "Frankfurt"]),
            ("japan", ["Tokyo", "Osaka", "Yokohama", "Kobe", "Nagoya"]),
            ("brazil", ["São Paulo", "Rio de Janeiro", "Santos", "Salvador", "Recife"]),
            ("ecuador", ["Guayaquil", "Quito", "Cuenca", "Machala", "Manta"]),
            ("colombia", ["Bogotá", "Medellín", "Cali", "Barranquilla", "Cartagena"]),
            ("peru", ["Lima", "Callao", "Arequipa", "Trujillo", "Chiclayo"]),
            ("chile", ["Santiago", "Valparaíso", "Concepción", "Antofagasta", "Iquique"]),
            ("mexico", ["Ciudad de México", "Guadalajara", "Monterrey", "Tijuana", "Veracruz"]),
        ];

        Self::new(
            table
                .into_iter()
                .map(|(code, cities)| Country {
                    code: code.to_string(),
                    cities: cities.iter().map(|c| c.to_string()).collect(),
                })
                .collect(),
        )
    }
}

/// Form value for a city: lowercase, whitespace runs replaced by `-`.
pub fn city_slug(name: &str) -> String {
    name.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
