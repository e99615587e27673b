use serde::{Deserialize, Serialize};

/// * `driver_number` - Car number of the driver, used as stable identifier, e.g. 44
/// * `name_acronym` - Three letter acronym, e.g. HAM
/// * `full_name` - Driver name, e.g. Lewis HAMILTON
/// * `broadcast_name` - Name as shown on the broadcast, e.g. L HAMILTON
/// * `team_name` - Team the driver is racing for, e.g. Mercedes
/// * `team_colour` - Hex-code of the team color without leading #, e.g. 27F4D2 (used for
/// rendering)
/// * `headshot_url` - Reference to the driver portrait
/// * `country_code` - Country code of the driver, e.g. GBR
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Competitor {
    pub driver_number: u32,
    #[serde(default)]
    pub name_acronym: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub broadcast_name: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub team_colour: Option<String>,
    #[serde(default)]
    pub headshot_url: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

impl Competitor {
    /// display_name returns the acronym of the driver or, if it is not available, the car number
    /// in the form #44.
    pub fn display_name(&self) -> String {
        if self.name_acronym.is_empty() {
            format!("#{}", self.driver_number)
        } else {
            self.name_acronym.to_owned()
        }
    }
}
