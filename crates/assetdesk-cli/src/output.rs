//! Plain-text rendering of API responses.

use assetdesk_core::{
  asset::Asset,
  dashboard::DashboardView,
  employee::{AccessoryMap, Employee},
  lifecycle::UsageReport,
};

pub fn assets(assets: &[Asset]) {
  if assets.is_empty() {
    println!("no assets");
    return;
  }
  for a in assets {
    let holder = a
      .assignment
      .map(|x| format!("  -> {} since {}", x.employee_id, x.date))
      .unwrap_or_default();
    println!(
      "{}  {:<12} {:<18} {} ({}){holder}",
      a.asset_id, a.status, a.category, a.name, a.serial_number
    );
  }
}

pub fn employees(employees: &[Employee]) {
  if employees.is_empty() {
    println!("no employees");
    return;
  }
  for e in employees {
    let held: Vec<&str> = e.held_accessories().collect();
    println!("{}  {:<8} {} <{}> {}", e.employee_id, e.status, e.name, e.email, e.position);
    if !held.is_empty() {
      println!("    holds: {}", held.join(", "));
    }
  }
}

pub fn accessories(map: &AccessoryMap) {
  for (key, held) in map {
    println!("[{}] {key}", if *held { "x" } else { " " });
  }
}

pub fn history(report: &UsageReport) {
  println!("{} ({}) - {}", report.name, report.serial_number, report.status);
  match &report.holder {
    Some(h) => println!(
      "held by {} since {}",
      h.name.as_deref().unwrap_or("unknown employee"),
      h.since
    ),
    None => println!("not assigned"),
  }
  if report.entries.is_empty() {
    println!("no history");
  }
  for entry in &report.entries {
    println!(
      "  {}  {}  ({})",
      entry.timestamp.format("%Y-%m-%d %H:%M"),
      entry.action,
      entry.actor
    );
  }
}

pub fn dashboard(view: &DashboardView) {
  let s = &view.stats;
  println!("assets      {}", s.total_assets);
  println!("employees   {}", s.total_employees);
  println!("available   {}", s.available);
  println!("in use      {}", s.in_use);
  println!("maintenance {}", s.maintenance);
  println!("inactive    {}", s.inactive);

  if !view.by_category.is_empty() {
    println!();
    for (category, n) in &view.by_category {
      println!("{category:<18} {n}");
    }
  }

  if !view.activity.is_empty() {
    println!();
    for item in &view.activity {
      println!("{:<16} {} ({})", item.time_ago, item.activity.text, item.activity.actor);
    }
  }
}
