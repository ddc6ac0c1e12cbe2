//! Region model.
//!
//! Italian regions that levy a regional income-tax surtax. Trentino-Alto
//! Adige is represented by its two autonomous provinces, which set their
//! own schedules, so the list has 21 entries.

use serde::{Deserialize, Serialize};

/// A region (or autonomous province) with its own surtax schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Abruzzo.
    Abruzzo,
    /// Basilicata.
    Basilicata,
    /// Provincia Autonoma di Bolzano.
    Bolzano,
    /// Calabria.
    Calabria,
    /// Campania.
    Campania,
    /// Emilia-Romagna.
    EmiliaRomagna,
    /// Friuli Venezia Giulia.
    FriuliVeneziaGiulia,
    /// Lazio.
    Lazio,
    /// Liguria.
    Liguria,
    /// Lombardia.
    Lombardia,
    /// Marche.
    Marche,
    /// Molise.
    Molise,
    /// Piemonte.
    Piemonte,
    /// Puglia.
    Puglia,
    /// Sardegna.
    Sardegna,
    /// Sicilia.
    Sicilia,
    /// Toscana.
    Toscana,
    /// Provincia Autonoma di Trento.
    Trento,
    /// Umbria.
    Umbria,
    /// Valle d'Aosta.
    ValleDAosta,
    /// Veneto.
    Veneto,
}

impl Region {
    /// Every recognised region, in alphabetical order of variant.
    pub const ALL: [Region; 21] = [
        Region::Abruzzo,
        Region::Basilicata,
        Region::Bolzano,
        Region::Calabria,
        Region::Campania,
        Region::EmiliaRomagna,
        Region::FriuliVeneziaGiulia,
        Region::Lazio,
        Region::Liguria,
        Region::Lombardia,
        Region::Marche,
        Region::Molise,
        Region::Piemonte,
        Region::Puglia,
        Region::Sardegna,
        Region::Sicilia,
        Region::Toscana,
        Region::Trento,
        Region::Umbria,
        Region::ValleDAosta,
        Region::Veneto,
    ];

    /// The official Italian display name.
    pub fn name(self) -> &'static str {
        match self {
            Region::Abruzzo => "Abruzzo",
            Region::Basilicata => "Basilicata",
            Region::Bolzano => "Provincia Autonoma di Bolzano",
            Region::Calabria => "Calabria",
            Region::Campania => "Campania",
            Region::EmiliaRomagna => "Emilia-Romagna",
            Region::FriuliVeneziaGiulia => "Friuli Venezia Giulia",
            Region::Lazio => "Lazio",
            Region::Liguria => "Liguria",
            Region::Lombardia => "Lombardia",
            Region::Marche => "Marche",
            Region::Molise => "Molise",
            Region::Piemonte => "Piemonte",
            Region::Puglia => "Puglia",
            Region::Sardegna => "Sardegna",
            Region::Sicilia => "Sicilia",
            Region::Toscana => "Toscana",
            Region::Trento => "Provincia Autonoma di Trento",
            Region::Umbria => "Umbria",
            Region::ValleDAosta => "Valle d'Aosta",
            Region::Veneto => "Veneto",
        }
    }

    /// Resolves a free-form region name.
    ///
    /// Matching ignores case, surrounding whitespace, hyphens versus spaces
    /// and typographic apostrophes, so `"emilia romagna"` and
    /// `"Valle d’Aosta"` both resolve. Returns `None` for anything else;
    /// callers treat that as "no regional surtax".
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_engine::models::Region;
    ///
    /// assert_eq!(Region::from_name("Lombardia"), Some(Region::Lombardia));
    /// assert_eq!(Region::from_name("valle d’aosta"), Some(Region::ValleDAosta));
    /// assert_eq!(Region::from_name("Atlantis"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Region> {
        let wanted = normalize(name);
        Region::ALL
            .into_iter()
            .find(|region| normalize(region.name()) == wanted)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '’' | '`' => '\'',
            '-' => ' ',
            other => other,
        })
        .collect::<String>()
        .to_lowercase()
}
