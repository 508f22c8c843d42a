//! Maintenance analytics engine
//!
//! A stateless read model over the record store: alerts, the
//! maintenance-rate percentage, chart aggregations and the Hall of Fame
//! owner ranking. Every call reads a fresh snapshot and computes in memory;
//! nothing here mutates records or caches across requests. Any store error
//! fails the whole response rather than rendering a partial dashboard.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{Duration, NaiveDate, Utc};
use indexmap::IndexMap;

use crate::{
    api::analytics::{
        ChartDataResponse, DashboardAlerts, DashboardResponse, HallOfFameEntry, StatEntry,
        TemperatureChart, TemperatureSeries,
    },
    error::AppResult,
    models::{
        maintenance_log::LogFilter, service::OIL_SERVICES, work_week::work_week_label, Equipment,
        MaintenanceLog,
    },
    repository::Repository,
};

/// Alert lookback in days, boundary inclusive
const ALERT_WINDOW_DAYS: i64 = 14;
/// Lookback for the maintenance-rate numerator
const MAINTAINED_WINDOW_DAYS: i64 = 7;
/// Lookback for the temperature trend chart
const TEMPERATURE_WINDOW_DAYS: i64 = 60;
/// Pump temperature at or above this raises a high-temperature alert
const HIGH_TEMP_THRESHOLD: f64 = 80.0;
/// Points an owner earns per week for touching every pump they own
const WEEKLY_POINTS: f64 = 10.0;

#[derive(Clone)]
pub struct AnalyticsService {
    repository: Repository,
}

impl AnalyticsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Dashboard payload: alert lists, maintenance rate and the current
    /// week's logs
    pub async fn dashboard(&self) -> AppResult<DashboardResponse> {
        let today = Utc::now().date_naive();
        let current_work_week = work_week_label(today);

        let equipment = self.repository.equipment.list().await?;
        let recent = self
            .repository
            .logs
            .list(&LogFilter {
                since: Some(today - Duration::days(ALERT_WINDOW_DAYS)),
                ..Default::default()
            })
            .await?;
        let mut current_logs = self
            .repository
            .logs
            .list(&LogFilter {
                work_week: Some(current_work_week.clone()),
                ..Default::default()
            })
            .await?;
        current_logs.sort_by_key(|l| l.equipment_id);

        let alerts = compute_alerts(&equipment, &recent, today);
        let maintenance_rate = compute_maintenance_rate(&equipment, &recent, today);

        Ok(DashboardResponse {
            current_work_week,
            alerts,
            maintenance_rate,
            current_logs,
        })
    }

    /// Chart payload: temperature trend, per-equipment log counts and the
    /// service-type histogram
    pub async fn charts(&self) -> AppResult<ChartDataResponse> {
        let today = Utc::now().date_naive();
        let cutoff = today - Duration::days(TEMPERATURE_WINDOW_DAYS);

        let equipment = self.repository.equipment.list().await?;
        let logs = self.repository.logs.list(&LogFilter::default()).await?;

        Ok(ChartDataResponse {
            temperature: build_temperature_chart(&equipment, &logs, cutoff),
            maintenance_counts: count_logs_per_equipment(&equipment, &logs),
            service_histogram: count_logs_per_service(&logs),
        })
    }

    /// Owner ranking over the eligible-equipment set
    pub async fn hall_of_fame(&self) -> AppResult<Vec<HallOfFameEntry>> {
        let equipment = self.repository.equipment.list().await?;
        let logs = self.repository.logs.list(&LogFilter::default()).await?;
        Ok(compute_hall_of_fame(&equipment, &logs))
    }
}

/// Needs-oil and high-temperature alert lists over the trailing 14-day
/// window ending today, boundary inclusive. Both matches are existence
/// joins, so each equipment appears at most once per list.
fn compute_alerts(
    equipment: &[Equipment],
    logs: &[MaintenanceLog],
    today: NaiveDate,
) -> DashboardAlerts {
    let window_start = today - Duration::days(ALERT_WINDOW_DAYS);
    let mut needs_oil_ids = HashSet::new();
    let mut high_temp_ids = HashSet::new();

    for log in logs.iter().filter(|l| l.check_date >= window_start) {
        // exact match against the oil-service vocabulary, no case folding
        if OIL_SERVICES.contains(&log.service.as_str()) {
            needs_oil_ids.insert(log.equipment_id);
        }
        if log.pump_temp.is_some_and(|t| t >= HIGH_TEMP_THRESHOLD) {
            high_temp_ids.insert(log.equipment_id);
        }
    }

    DashboardAlerts {
        needs_oil: equipment
            .iter()
            .filter(|e| needs_oil_ids.contains(&e.equipment_id))
            .cloned()
            .collect(),
        high_temp: equipment
            .iter()
            .filter(|e| high_temp_ids.contains(&e.equipment_id))
            .cloned()
            .collect(),
    }
}

/// Percentage of equipment with at least one log in the trailing 7-day
/// window. Zero when there is no equipment at all.
fn compute_maintenance_rate(
    equipment: &[Equipment],
    recent: &[MaintenanceLog],
    today: NaiveDate,
) -> f64 {
    if equipment.is_empty() {
        return 0.0;
    }
    let window_start = today - Duration::days(MAINTAINED_WINDOW_DAYS);
    let maintained: HashSet<i32> = recent
        .iter()
        .filter(|l| l.check_date >= window_start)
        .map(|l| l.equipment_id)
        .collect();
    maintained.len() as f64 / equipment.len() as f64 * 100.0
}

/// Per-equipment temperature series over the trailing window. Labels are
/// the sorted distinct reading dates; a date with no reading for a given
/// equipment yields a null point, never zero.
fn build_temperature_chart(
    equipment: &[Equipment],
    logs: &[MaintenanceLog],
    cutoff: NaiveDate,
) -> TemperatureChart {
    let names: HashMap<i32, &str> = equipment
        .iter()
        .map(|e| (e.equipment_id, e.equipment_name.as_str()))
        .collect();

    let mut readings: Vec<&MaintenanceLog> = logs
        .iter()
        .filter(|l| l.pump_temp.is_some() && l.check_date >= cutoff)
        .collect();
    readings.sort_by_key(|l| (l.check_date, l.log_id));

    let mut dates = BTreeSet::new();
    // equipment name -> date label -> reading; insertion order of first
    // reading decides series order, a later reading on the same date wins
    let mut per_equipment: IndexMap<&str, HashMap<String, f64>> = IndexMap::new();

    for log in readings {
        let Some(&name) = names.get(&log.equipment_id) else {
            continue;
        };
        let date = log.check_date.format("%Y-%m-%d").to_string();
        dates.insert(date.clone());
        per_equipment
            .entry(name)
            .or_default()
            .insert(date, log.pump_temp.unwrap_or_default());
    }

    let labels: Vec<String> = dates.into_iter().collect();
    let series = per_equipment
        .into_iter()
        .map(|(name, values)| TemperatureSeries {
            name: name.to_string(),
            values: labels.iter().map(|d| values.get(d).copied()).collect(),
        })
        .collect();

    TemperatureChart { labels, series }
}

/// All-time log count per equipment, in asset-number order; equipment with
/// no logs is left out of the summary
fn count_logs_per_equipment(equipment: &[Equipment], logs: &[MaintenanceLog]) -> Vec<StatEntry> {
    let mut counts: HashMap<i32, i64> = HashMap::new();
    for log in logs {
        *counts.entry(log.equipment_id).or_insert(0) += 1;
    }
    equipment
        .iter()
        .filter_map(|e| {
            counts.get(&e.equipment_id).map(|&value| StatEntry {
                label: e.equipment_name.clone(),
                value,
            })
        })
        .collect()
}

/// All-time log count per service action, most common first
fn count_logs_per_service(logs: &[MaintenanceLog]) -> Vec<StatEntry> {
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for log in logs {
        *counts.entry(log.service.as_str()).or_insert(0) += 1;
    }
    let mut entries: Vec<StatEntry> = counts
        .into_iter()
        .map(|(label, value)| StatEntry {
            label: label.to_string(),
            value,
        })
        .collect();
    entries.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.label.cmp(&b.label)));
    entries
}

/// Owner ranking. Each owner's score rewards keeping their own pumps
/// maintained, normalised by how many pumps they own:
/// for every work week, the distinct eligible equipment checked under the
/// owner's name earns `n * 10 / owned` points, and the total is the sum
/// over weeks rounded to one decimal. Owners of eligible equipment always
/// appear, even with no logged weeks.
pub fn compute_hall_of_fame(
    equipment: &[Equipment],
    logs: &[MaintenanceLog],
) -> Vec<HallOfFameEntry> {
    let eligible: Vec<&Equipment> = equipment
        .iter()
        .filter(|e| e.in_weekly_rotation())
        .collect();
    let eligible_ids: HashSet<i32> = eligible.iter().map(|e| e.equipment_id).collect();

    let mut owners: Vec<&str> = eligible
        .iter()
        .filter_map(|e| e.pump_owner.as_deref())
        .filter(|o| !o.trim().is_empty())
        .collect();
    owners.sort_unstable();
    owners.dedup();

    let mut entries = Vec::with_capacity(owners.len());
    for owner in owners {
        let owned = eligible
            .iter()
            .filter(|e| e.pump_owner.as_deref() == Some(owner))
            .count();
        if owned == 0 {
            // stale owner list; skip rather than divide by zero
            continue;
        }

        // group this owner's checks by stored week label, deduplicating
        // equipment within a week so a second log on the same pump in the
        // same week earns nothing extra
        let mut weeks: HashMap<&str, HashSet<i32>> = HashMap::new();
        for log in logs {
            if log.user_name.as_deref() == Some(owner)
                && eligible_ids.contains(&log.equipment_id)
            {
                weeks
                    .entry(log.work_week.as_str())
                    .or_default()
                    .insert(log.equipment_id);
            }
        }

        let total: f64 = weeks
            .values()
            .map(|touched| touched.len() as f64 * WEEKLY_POINTS / owned as f64)
            .sum();

        entries.push(HallOfFameEntry {
            rank: 0,
            name: owner.to_string(),
            score: (total * 10.0).round() / 10.0,
            equipment_owned: owned as i64,
            weeks_active: weeks.len() as i64,
        });
    }

    entries.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = (i + 1) as i64;
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn equipment(id: i32, name: &str, oil_type: Option<&str>, owner: Option<&str>) -> Equipment {
        Equipment {
            equipment_id: id,
            equipment_name: name.to_string(),
            pump_model: None,
            oil_type: oil_type.map(String::from),
            pump_owner: owner.map(String::from),
            status: "active".to_string(),
            notes: None,
        }
    }

    fn log(
        log_id: i32,
        equipment_id: i32,
        work_week: &str,
        check_date: NaiveDate,
        user_name: Option<&str>,
        pump_temp: Option<f64>,
        service: &str,
    ) -> MaintenanceLog {
        MaintenanceLog {
            log_id,
            equipment_id,
            work_week: work_week.to_string(),
            check_date,
            user_name: user_name.map(String::from),
            oil_level_ok: true,
            oil_condition_ok: true,
            oil_filter_ok: true,
            pump_temp,
            service: service.to_string(),
            service_notes: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn hall_of_fame_scores_weeks_normalised_by_owned_count() {
        let fleet = vec![
            equipment(1, "Elyte GB", Some("Ultra Grade 19"), Some("Sam")),
            equipment(2, "Chem GB 005", Some("Ultra Grade 19"), Some("Sam")),
        ];
        let logs = vec![
            // WW14: both pumps checked -> 2 * 10 / 2 = 10.0
            log(1, 1, "2025-WW14", day(2025, 4, 1), Some("Sam"), None, "None Required"),
            log(2, 2, "2025-WW14", day(2025, 4, 2), Some("Sam"), None, "None Required"),
            // WW15: one pump checked -> 1 * 10 / 2 = 5.0
            log(3, 1, "2025-WW15", day(2025, 4, 8), Some("Sam"), None, "None Required"),
        ];

        let ranking = compute_hall_of_fame(&fleet, &logs);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].rank, 1);
        assert_eq!(ranking[0].name, "Sam");
        assert_eq!(ranking[0].score, 15.0);
        assert_eq!(ranking[0].equipment_owned, 2);
        assert_eq!(ranking[0].weeks_active, 2);
    }

    #[test]
    fn hall_of_fame_dedups_equipment_within_a_week() {
        let fleet = vec![equipment(1, "Jupiter", Some("Ultra Grade 19"), Some("Sam"))];
        let logs = vec![
            log(1, 1, "2025-WW14", day(2025, 4, 1), Some("Sam"), None, "None Required"),
            log(2, 1, "2025-WW14", day(2025, 4, 3), Some("Sam"), None, "Add Oil"),
        ];

        let ranking = compute_hall_of_fame(&fleet, &logs);
        assert_eq!(ranking[0].score, 10.0);
        assert_eq!(ranking[0].weeks_active, 1);
    }

    #[test]
    fn hall_of_fame_keeps_owners_with_no_activity() {
        let fleet = vec![
            equipment(1, "Jupiter", Some("Ultra Grade 19"), Some("Sam")),
            equipment(2, "Olympus", Some("Ultra Grade 19"), Some("Alex")),
        ];
        let logs = vec![log(
            1, 1, "2025-WW14", day(2025, 4, 1), Some("Sam"), None, "None Required",
        )];

        let ranking = compute_hall_of_fame(&fleet, &logs);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[1].name, "Alex");
        assert_eq!(ranking[1].score, 0.0);
        assert_eq!(ranking[1].weeks_active, 0);
        assert_eq!(ranking[1].equipment_owned, 1);
    }

    #[test]
    fn hall_of_fame_ignores_out_of_rotation_equipment() {
        let fleet = vec![
            equipment(1, "Laser Weld GB", Some("Scroll"), Some("Sam")),
            equipment(2, "Spare 1 0045", Some("Ultra Grade 19"), Some("Sam")),
            equipment(3, "Jupiter", Some("Ultra Grade 19"), Some("Sam")),
        ];
        let logs = vec![
            // checks on the scroll pump and the spare must not score
            log(1, 1, "2025-WW14", day(2025, 4, 1), Some("Sam"), None, "None Required"),
            log(2, 2, "2025-WW14", day(2025, 4, 1), Some("Sam"), None, "None Required"),
            log(3, 3, "2025-WW14", day(2025, 4, 1), Some("Sam"), None, "None Required"),
        ];

        let ranking = compute_hall_of_fame(&fleet, &logs);
        assert_eq!(ranking.len(), 1);
        // owned = 1 (only Jupiter is eligible), one week, one pump
        assert_eq!(ranking[0].score, 10.0);
        assert_eq!(ranking[0].equipment_owned, 1);
    }

    #[test]
    fn hall_of_fame_counts_checks_by_performer_not_owner() {
        let fleet = vec![
            equipment(1, "Jupiter", Some("Ultra Grade 19"), Some("Sam")),
            equipment(2, "Olympus", Some("Ultra Grade 19"), Some("Alex")),
        ];
        // Sam logged a check on Alex's pump under Sam's name
        let logs = vec![log(
            1, 2, "2025-WW14", day(2025, 4, 1), Some("Sam"), None, "None Required",
        )];

        let ranking = compute_hall_of_fame(&fleet, &logs);
        let sam = ranking.iter().find(|e| e.name == "Sam").unwrap();
        let alex = ranking.iter().find(|e| e.name == "Alex").unwrap();
        assert_eq!(sam.score, 10.0);
        assert_eq!(alex.score, 0.0);
    }

    #[test]
    fn hall_of_fame_breaks_score_ties_by_name() {
        let fleet = vec![
            equipment(1, "Jupiter", Some("Ultra Grade 19"), Some("Zoe")),
            equipment(2, "Olympus", Some("Ultra Grade 19"), Some("Alex")),
        ];
        let logs = vec![
            log(1, 1, "2025-WW14", day(2025, 4, 1), Some("Zoe"), None, "None Required"),
            log(2, 2, "2025-WW14", day(2025, 4, 1), Some("Alex"), None, "None Required"),
        ];

        let ranking = compute_hall_of_fame(&fleet, &logs);
        assert_eq!(ranking[0].name, "Alex");
        assert_eq!(ranking[0].rank, 1);
        assert_eq!(ranking[1].name, "Zoe");
        assert_eq!(ranking[1].rank, 2);
    }

    #[test]
    fn maintenance_rate_is_zero_without_equipment() {
        let rate = compute_maintenance_rate(&[], &[], day(2025, 4, 10));
        assert_eq!(rate, 0.0);
    }

    #[test]
    fn maintenance_rate_counts_distinct_equipment_in_window() {
        let today = day(2025, 4, 10);
        let fleet = vec![
            equipment(1, "Jupiter", None, None),
            equipment(2, "Olympus", None, None),
        ];
        let logs = vec![
            // two logs on the same pump inside the window count once
            log(1, 1, "2025-WW15", day(2025, 4, 9), None, None, "None Required"),
            log(2, 1, "2025-WW15", day(2025, 4, 10), None, None, "None Required"),
            // outside the 7-day window
            log(3, 2, "2025-WW14", day(2025, 4, 1), None, None, "None Required"),
        ];

        let rate = compute_maintenance_rate(&fleet, &logs, today);
        assert_eq!(rate, 50.0);
    }

    #[test]
    fn alerts_match_oil_services_exactly() {
        let fleet = vec![
            equipment(1, "Jupiter", None, None),
            equipment(2, "Olympus", None, None),
            equipment(3, "Zeus", None, None),
        ];
        let date = day(2025, 4, 9);
        let logs = vec![
            log(1, 1, "2025-WW15", date, None, None, "Add Oil"),
            log(2, 2, "2025-WW15", date, None, None, "Drain & Replace Oil"),
            // open vocabulary: near-misses are not oil services
            log(3, 3, "2025-WW15", date, None, None, "add oil"),
        ];

        let alerts = compute_alerts(&fleet, &logs, day(2025, 4, 10));
        let ids: Vec<i32> = alerts.needs_oil.iter().map(|e| e.equipment_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn needs_oil_alert_window_is_fourteen_days_inclusive() {
        let today = day(2025, 4, 20);
        let fleet = vec![
            equipment(1, "Jupiter", None, None),
            equipment(2, "Olympus", None, None),
        ];
        let logs = vec![
            // exactly 14 days ago: still in the window
            log(1, 1, "2025-WW15", day(2025, 4, 6), None, None, "Add Oil"),
            // 15 days ago: out
            log(2, 2, "2025-WW15", day(2025, 4, 5), None, None, "Add Oil"),
        ];

        let alerts = compute_alerts(&fleet, &logs, today);
        let ids: Vec<i32> = alerts.needs_oil.iter().map(|e| e.equipment_id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn high_temp_alert_boundary_is_inclusive() {
        let fleet = vec![
            equipment(1, "Jupiter", None, None),
            equipment(2, "Olympus", None, None),
        ];
        let date = day(2025, 4, 9);
        let logs = vec![
            log(1, 1, "2025-WW15", date, None, Some(80.0), "None Required"),
            log(2, 2, "2025-WW15", date, None, Some(79.9), "None Required"),
        ];

        let alerts = compute_alerts(&fleet, &logs, day(2025, 4, 10));
        let ids: Vec<i32> = alerts.high_temp.iter().map(|e| e.equipment_id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn temperature_chart_reports_missing_dates_as_null() {
        let fleet = vec![
            equipment(1, "Jupiter", None, None),
            equipment(2, "Olympus", None, None),
        ];
        let logs = vec![
            log(1, 1, "2025-WW15", day(2025, 4, 8), None, Some(70.5), "None Required"),
            log(2, 2, "2025-WW15", day(2025, 4, 9), None, Some(82.0), "None Required"),
            // no reading recorded: must not appear anywhere in the chart
            log(3, 1, "2025-WW15", day(2025, 4, 9), None, None, "None Required"),
        ];

        let chart = build_temperature_chart(&fleet, &logs, day(2025, 3, 1));
        assert_eq!(chart.labels, vec!["2025-04-08", "2025-04-09"]);

        let jupiter = chart.series.iter().find(|s| s.name == "Jupiter").unwrap();
        assert_eq!(jupiter.values, vec![Some(70.5), None]);
        let olympus = chart.series.iter().find(|s| s.name == "Olympus").unwrap();
        assert_eq!(olympus.values, vec![None, Some(82.0)]);
    }

    #[test]
    fn temperature_chart_skips_readings_before_cutoff() {
        let fleet = vec![equipment(1, "Jupiter", None, None)];
        let logs = vec![
            log(1, 1, "2025-WW01", day(2025, 1, 2), None, Some(65.0), "None Required"),
            log(2, 1, "2025-WW15", day(2025, 4, 9), None, Some(71.0), "None Required"),
        ];

        let chart = build_temperature_chart(&fleet, &logs, day(2025, 2, 8));
        assert_eq!(chart.labels, vec!["2025-04-09"]);
        assert_eq!(chart.series[0].values, vec![Some(71.0)]);
    }

    #[test]
    fn service_histogram_counts_all_services() {
        let date = day(2025, 4, 9);
        let logs = vec![
            log(1, 1, "2025-WW15", date, None, None, "None Required"),
            log(2, 1, "2025-WW15", date, None, None, "None Required"),
            log(3, 1, "2025-WW15", date, None, None, "Add Oil"),
        ];

        let histogram = count_logs_per_service(&logs);
        assert_eq!(histogram[0].label, "None Required");
        assert_eq!(histogram[0].value, 2);
        assert_eq!(histogram[1].label, "Add Oil");
        assert_eq!(histogram[1].value, 1);
    }

    #[test]
    fn equipment_counts_skip_unlogged_equipment() {
        let fleet = vec![
            equipment(1, "Jupiter", None, None),
            equipment(2, "Olympus", None, None),
        ];
        let logs = vec![
            log(1, 1, "2025-WW15", day(2025, 4, 9), None, None, "None Required"),
            log(2, 1, "2025-WW14", day(2025, 4, 2), None, None, "None Required"),
        ];

        let counts = count_logs_per_equipment(&fleet, &logs);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].label, "Jupiter");
        assert_eq!(counts[0].value, 2);
    }
}
