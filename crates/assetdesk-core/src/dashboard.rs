//! Read-only summary of the asset and employee collections.

use std::{cmp::Reverse, collections::BTreeMap};

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  actor::Actor,
  asset::{Asset, AssetCategory, AssetStatus},
  employee::Employee,
  store::{AssetFilter, EmployeeFilter, RecordStore},
};

const PER_SOURCE: usize = 5;
const FEED_LEN: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
  pub total_assets:    usize,
  pub total_employees: usize,
  pub available:       usize,
  pub in_use:          usize,
  pub maintenance:     usize,
  pub inactive:        usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
  AssetRegistered,
  EmployeeRegistered,
  AssetAssigned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
  pub kind:      ActivityKind,
  pub subject:   Uuid,
  pub text:      String,
  pub actor:     Actor,
  pub timestamp: DateTime<Utc>,
}

/// An [`Activity`] with its timestamp rendered relative to a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedActivity {
  #[serde(flatten)]
  pub activity: Activity,
  pub time_ago: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
  pub stats:       Stats,
  pub by_category: BTreeMap<AssetCategory, usize>,
  /// Most recent first, at most ten entries.
  pub activity:    Vec<Activity>,
}

/// A [`Summary`] as presented at a given moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
  pub stats:       Stats,
  pub by_category: BTreeMap<AssetCategory, usize>,
  pub activity:    Vec<RenderedActivity>,
}

impl Summary {
  pub fn recent_activity(&self, now: DateTime<Utc>) -> Vec<RenderedActivity> {
    self
      .activity
      .iter()
      .map(|a| RenderedActivity { activity: a.clone(), time_ago: time_ago(a.timestamp, now) })
      .collect()
  }

  pub fn view(&self, now: DateTime<Utc>) -> DashboardView {
    DashboardView {
      stats:       self.stats.clone(),
      by_category: self.by_category.clone(),
      activity:    self.recent_activity(now),
    }
  }
}

/// Derive the summary from full collections.
pub fn summarize(assets: &[Asset], employees: &[Employee]) -> Summary {
  let mut stats = Stats {
    total_assets: assets.len(),
    total_employees: employees.len(),
    ..Stats::default()
  };
  let mut by_category = BTreeMap::new();
  for asset in assets {
    match asset.status {
      AssetStatus::Available => stats.available += 1,
      AssetStatus::InUse => stats.in_use += 1,
      AssetStatus::Maintenance => stats.maintenance += 1,
      AssetStatus::Inactive => stats.inactive += 1,
    }
    *by_category.entry(asset.category).or_insert(0) += 1;
  }

  Summary { stats, by_category, activity: activity_feed(assets, employees) }
}

/// Loads both collections and summarizes them.
pub async fn load<S: RecordStore>(store: &S) -> Result<Summary> {
  let assets = store.list_assets(&AssetFilter::default()).await.map_err(Error::store)?;
  let employees = store
    .list_employees(&EmployeeFilter::default())
    .await
    .map_err(Error::store)?;
  Ok(summarize(&assets, &employees))
}

fn newest<T, K: Ord>(items: impl Iterator<Item = T>, key: impl Fn(&T) -> K) -> Vec<T> {
  let mut items: Vec<T> = items.collect();
  items.sort_by_key(|t| Reverse(key(t)));
  items.truncate(PER_SOURCE);
  items
}

fn activity_feed(assets: &[Asset], employees: &[Employee]) -> Vec<Activity> {
  let registered_assets = newest(assets.iter(), |a| a.created_at).into_iter().map(|a| Activity {
    kind:      ActivityKind::AssetRegistered,
    subject:   a.asset_id,
    text:      format!("Ativo {} ({}) cadastrado", a.name, a.serial_number),
    actor:     Actor::system(),
    timestamp: a.created_at,
  });

  let registered_employees =
    newest(employees.iter(), |e| e.created_at).into_iter().map(|e| Activity {
      kind:      ActivityKind::EmployeeRegistered,
      subject:   e.employee_id,
      text:      format!("Funcionário {} cadastrado", e.name),
      actor:     Actor::system(),
      timestamp: e.created_at,
    });

  // The five newest assignments are picked first; ones whose employee no
  // longer resolves are then dropped without being replaced.
  let assigned = assets
    .iter()
    .filter_map(|a| a.assignment.map(|x| (a, x, x.date.and_time(NaiveTime::MIN).and_utc())));
  let assignments = newest(assigned, |(_, _, at)| *at).into_iter().filter_map(|(a, x, at)| {
    let employee = employees.iter().find(|e| e.employee_id == x.employee_id)?;
    Some(Activity {
      kind:      ActivityKind::AssetAssigned,
      subject:   a.asset_id,
      text:      format!("Ativo {} atribuído a {}", a.name, employee.name),
      actor:     Actor::system(),
      timestamp: at,
    })
  });

  let mut feed: Vec<Activity> =
    registered_assets.chain(registered_employees).chain(assignments).collect();
  // Stable: equal timestamps keep asset, employee, assignment order.
  feed.sort_by_key(|a| Reverse(a.timestamp));
  feed.truncate(FEED_LEN);
  feed
}

/// Render `at` relative to `now` in Portuguese using the largest whole unit,
/// e.g. "há 5 minutos" or "em 2 dias".
pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
  const UNITS: [(i64, &str, &str); 6] = [
    (365 * 86_400, "ano", "anos"),
    (30 * 86_400, "mês", "meses"),
    (86_400, "dia", "dias"),
    (3_600, "hora", "horas"),
    (60, "minuto", "minutos"),
    (1, "segundo", "segundos"),
  ];

  let delta = (now - at).num_seconds();
  let secs = delta.abs();
  let (n, one, many) = UNITS
    .iter()
    .find(|(size, ..)| secs >= *size)
    .map(|(size, one, many)| (secs / size, *one, *many))
    .unwrap_or((0, "segundo", "segundos"));
  let unit = if n == 1 { one } else { many };

  if delta >= 0 { format!("há {n} {unit}") } else { format!("em {n} {unit}") }
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, NaiveDate, TimeZone};

  use super::*;
  use crate::{
    asset::{Assignment, NewAsset},
    employee::NewEmployee,
    lifecycle,
    testing::MemoryStore,
  };

  #[tokio::test]
  async fn counts_by_status() {
    let store = MemoryStore::new();
    let dept = store.department("TI").await;
    let ana = store.employee("Ana", dept.department_id).await;
    store.employee("Beto", dept.department_id).await;

    store.asset("Spare", AssetCategory::Monitor, "S1").await;
    let used = store.asset("Laptop", AssetCategory::Notebook, "S2").await;
    let broken = store.asset("Phone", AssetCategory::Mobile, "S3").await;
    store
      .hand_over(used.asset_id, ana.employee_id, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap())
      .await;
    lifecycle::set_status(&store, broken.asset_id, AssetStatus::Maintenance)
      .await
      .unwrap();

    let summary = load(&store).await.unwrap();
    assert_eq!(summary.stats.total_assets, 3);
    assert_eq!(summary.stats.total_employees, 2);
    assert_eq!(summary.stats.available, 1);
    assert_eq!(summary.stats.in_use, 1);
    assert_eq!(summary.stats.maintenance, 1);
    assert_eq!(summary.by_category.get(&AssetCategory::Notebook), Some(&1));
    assert!(summary.activity.len() <= 10);

    let assigned: Vec<_> = summary
      .activity
      .iter()
      .filter(|a| a.kind == ActivityKind::AssetAssigned)
      .collect();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].text, "Ativo Laptop atribuído a Ana");
  }

  #[tokio::test]
  async fn feed_is_capped_and_newest_first() {
    let store = MemoryStore::new();
    let dept = store.department("TI").await;
    for i in 0..8 {
      store.employee(&format!("E{i}"), dept.department_id).await;
      store.asset(&format!("A{i}"), AssetCategory::Desktop, &format!("SN{i}")).await;
    }

    let summary = load(&store).await.unwrap();
    assert_eq!(summary.activity.len(), 10);
    assert!(summary.activity.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
  }

  #[tokio::test]
  async fn unresolved_assignee_is_not_reported() {
    let store = MemoryStore::new();
    let asset = store.asset("Orphan", AssetCategory::Notebook, "O1").await;
    store
      .hand_over(asset.asset_id, Uuid::new_v4(), NaiveDate::from_ymd_opt(2025, 1, 2).unwrap())
      .await;

    let summary = load(&store).await.unwrap();
    assert!(summary.activity.iter().all(|a| a.kind != ActivityKind::AssetAssigned));
  }

  #[tokio::test]
  async fn dangling_assignments_still_take_feed_slots() {
    let store = MemoryStore::new();
    let dept = store.department("TI").await;
    let ana = store.employee("Ana", dept.department_id).await;
    let gone = Uuid::new_v4();

    let first = store.asset("Old", AssetCategory::Notebook, "N0").await;
    store
      .hand_over(first.asset_id, ana.employee_id, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
      .await;
    for day in 2..7 {
      let asset = store.asset(&format!("N{day}"), AssetCategory::Notebook, &format!("N{day}")).await;
      store
        .hand_over(asset.asset_id, gone, NaiveDate::from_ymd_opt(2025, 1, day).unwrap())
        .await;
    }

    let summary = load(&store).await.unwrap();
    assert!(summary.activity.iter().all(|a| a.kind != ActivityKind::AssetAssigned));
  }

  #[test]
  fn ties_keep_source_order() {
    let at = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
    let mut asset = NewAsset::new("A", AssetCategory::Monitor, "S").into_asset(Uuid::nil(), at);
    let employee = NewEmployee::new("Ana", "a@x", "1", Uuid::nil(), "Dev")
      .into_employee(Uuid::new_v4(), at);
    asset.status = AssetStatus::InUse;
    asset.assignment = Some(Assignment { employee_id: employee.employee_id, date: at.date_naive() });

    let feed = activity_feed(std::slice::from_ref(&asset), std::slice::from_ref(&employee));
    let kinds: Vec<ActivityKind> = feed.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, [
      ActivityKind::AssetRegistered,
      ActivityKind::EmployeeRegistered,
      ActivityKind::AssetAssigned,
    ]);
  }

  #[test]
  fn relative_times() {
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap();
    assert_eq!(time_ago(now, now), "há 0 segundos");
    assert_eq!(time_ago(now - Duration::seconds(1), now), "há 1 segundo");
    assert_eq!(time_ago(now - Duration::minutes(5), now), "há 5 minutos");
    assert_eq!(time_ago(now - Duration::hours(3), now), "há 3 horas");
    assert_eq!(time_ago(now - Duration::days(45), now), "há 1 mês");
    assert_eq!(time_ago(now - Duration::days(800), now), "há 2 anos");
    assert_eq!(time_ago(now + Duration::days(2), now), "em 2 dias");
  }
}
