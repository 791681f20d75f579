use anyhow::{Context, Result};

use crate::model::Incident;
use crate::store::{IncidentStore, SqliteStore};

/// Sample St. Paul reference data and incidents for demonstration and
/// testing. Idempotent: reference rows use INSERT OR IGNORE and
/// incidents go through the conditional insert.
pub async fn load_seed_data(store: &SqliteStore) -> Result<()> {
    let codes: [(i64, &str); 6] = [
        (110, "Murder, Non-Negligent Manslaughter"),
        (300, "Robbery"),
        (500, "Burglary"),
        (700, "Auto Theft"),
        (1400, "Criminal Damage to Property"),
        (9954, "Proactive Police Visit"),
    ];

    let neighborhoods: [(i64, &str); 17] = [
        (1, "Conway/Battlecreek/Highwood"),
        (2, "Greater East Side"),
        (3, "West Side"),
        (4, "Dayton's Bluff"),
        (5, "Payne/Phalen"),
        (6, "North End"),
        (7, "Thomas/Dale(Frogtown)"),
        (8, "Summit/University"),
        (9, "West Seventh"),
        (10, "Como"),
        (11, "Hamline/Midway"),
        (12, "St. Anthony Park"),
        (13, "Union Park"),
        (14, "Macalester-Groveland"),
        (15, "Highland"),
        (16, "Summit Hill"),
        (17, "Capitol River"),
    ];

    for (code, incident_type) in codes {
        sqlx::query("INSERT OR IGNORE INTO Codes (code, incident_type) VALUES (?, ?)")
            .bind(code)
            .bind(incident_type)
            .execute(store.pool())
            .await
            .context("Failed to seed crime codes")?;
    }

    for (number, name) in neighborhoods {
        sqlx::query(
            "INSERT OR IGNORE INTO Neighborhoods (neighborhood_number, neighborhood_name) VALUES (?, ?)",
        )
        .bind(number)
        .bind(name)
        .execute(store.pool())
        .await
        .context("Failed to seed neighborhoods")?;
    }

    for incident in sample_incidents() {
        store.insert_incident(&incident).await?;
    }

    Ok(())
}

fn sample_incidents() -> Vec<Incident> {
    let rows: [(&str, &str, i64, &str, i64, i64, &str); 6] = [
        (
            "23100001",
            "2023-01-05T08:30:00",
            700,
            "Auto Theft",
            87,
            5,
            "9XX PAYNE AVE",
        ),
        (
            "23100002",
            "2023-01-15T22:10:00",
            300,
            "Robbery",
            92,
            6,
            "4XX RICE ST",
        ),
        (
            "23100003",
            "2023-01-31T13:45:00",
            500,
            "Burglary",
            87,
            5,
            "10XX ARCADE ST",
        ),
        (
            "23100004",
            "2023-02-02T03:05:00",
            1400,
            "Criminal Damage to Property",
            60,
            8,
            "7XX SELBY AVE",
        ),
        (
            "23100005",
            "2023-02-14T18:20:00",
            110,
            "Murder, Non-Negligent Manslaughter",
            92,
            6,
            "2XX MARYLAND AVE",
        ),
        (
            "23100006",
            "2023-03-01T11:00:00",
            700,
            "Auto Theft",
            101,
            11,
            "15XX UNIVERSITY AVE",
        ),
    ];

    rows.into_iter()
        .map(
            |(case_number, date_time, code, incident, police_grid, neighborhood_number, block)| {
                Incident {
                    case_number: case_number.to_string(),
                    date_time: date_time.to_string(),
                    code,
                    incident: incident.to_string(),
                    police_grid,
                    neighborhood_number,
                    block: block.to_string(),
                }
            },
        )
        .collect()
}
