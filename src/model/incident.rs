use serde::{Deserialize, Serialize};

/// A single crime incident as stored in the `Incidents` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub case_number: String,         // Unique case identifier (primary key)
    pub date_time: String,           // Stored as "<date>T<time>"
    pub code: i64,                   // Crime code (references Codes)
    pub incident: String,            // Free-text description
    pub police_grid: i64,            // Police grid number
    pub neighborhood_number: i64,    // References Neighborhoods
    pub block: String,               // Anonymized address fragment
}

impl Incident {
    /// Combine separate date and time strings into the stored form.
    pub fn combine_date_time(date: &str, time: &str) -> String {
        format!("{}T{}", date, time)
    }

    /// Date portion of the stored `<date>T<time>` value.
    pub fn date(&self) -> &str {
        match self.date_time.split_once('T') {
            Some((date, _)) => date,
            None => &self.date_time,
        }
    }

    /// Time portion of the stored `<date>T<time>` value.
    pub fn time(&self) -> &str {
        match self.date_time.split_once('T') {
            Some((_, time)) => time,
            None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_time_splits_at_separator() {
        let incident = Incident {
            case_number: "24000001".to_string(),
            date_time: "2024-01-05T08:30:00".to_string(),
            code: 700,
            incident: "Auto Theft".to_string(),
            police_grid: 87,
            neighborhood_number: 5,
            block: "9XX PAYNE AVE".to_string(),
        };

        assert_eq!(incident.date(), "2024-01-05");
        assert_eq!(incident.time(), "08:30:00");
    }

    #[test]
    fn date_time_without_separator_is_all_date() {
        let incident = Incident {
            case_number: "24000002".to_string(),
            date_time: "2024-01-05".to_string(),
            code: 700,
            incident: "Auto Theft".to_string(),
            police_grid: 87,
            neighborhood_number: 5,
            block: "9XX PAYNE AVE".to_string(),
        };

        assert_eq!(incident.date(), "2024-01-05");
        assert_eq!(incident.time(), "");
    }

    #[test]
    fn combine_uses_literal_t_separator() {
        assert_eq!(
            Incident::combine_date_time("2024-01-05", "08:30:00"),
            "2024-01-05T08:30:00"
        );
    }
}
