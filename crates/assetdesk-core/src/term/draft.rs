use std::collections::BTreeSet;

use chrono::NaiveDate;
use uuid::Uuid;

use super::{
  AssetLine, AssetSource, EmployeeSnapshot, TermDocument, TermType, accessory_line, template,
};
use crate::{
  Error, Result, ValidationError,
  accessory,
  asset::Asset,
  store::{AssetFilter, RecordStore},
};

/// An in-progress term selection.
///
/// Mirrors the generation form: choosing an employee (or changing the term
/// type) resets the selection to that employee's assigned assets, per the
/// type's [`AssetSource`], and pre-selects the accessories they hold.
/// Assigned assets are locked in; picked assets can be toggled.
#[derive(Debug, Clone)]
pub struct TermDraft {
  term_type:       TermType,
  employee:        Option<EmployeeSnapshot>,
  department_name: String,
  held:            Vec<String>,
  assigned:        Vec<AssetLine>,
  picked:          Vec<AssetLine>,
  accessories:     BTreeSet<String>,
  delivery_date:   NaiveDate,
  return_date:     Option<NaiveDate>,
}

impl TermDraft {
  pub fn new(term_type: TermType, delivery_date: NaiveDate) -> Self {
    Self {
      term_type,
      employee: None,
      department_name: String::new(),
      held: Vec::new(),
      assigned: Vec::new(),
      picked: Vec::new(),
      accessories: BTreeSet::new(),
      delivery_date,
      return_date: None,
    }
  }

  pub fn term_type(&self) -> TermType { self.term_type }

  pub fn employee(&self) -> Option<&EmployeeSnapshot> { self.employee.as_ref() }

  pub fn department_name(&self) -> &str { &self.department_name }

  /// Choose (or clear) the employee the term is for.
  pub async fn select_employee<S: RecordStore>(
    &mut self,
    store: &S,
    employee_id: Option<Uuid>,
  ) -> Result<()> {
    let Some(employee_id) = employee_id else {
      self.employee = None;
      self.department_name.clear();
      self.held.clear();
      self.reset_selection();
      return Ok(());
    };

    let employee = store
      .get_employee(employee_id)
      .await
      .map_err(Error::store)?
      .ok_or(ValidationError::UnknownEmployee(employee_id))?;

    let department_name = match employee.department_id {
      Some(id) => store
        .get_department(id)
        .await
        .map_err(Error::store)?
        .map(|d| d.name)
        .unwrap_or_default(),
      None => String::new(),
    };

    self.held = employee.held_accessories().map(str::to_owned).collect();
    self.employee = Some(EmployeeSnapshot::from(&employee));
    self.department_name = department_name;
    self.resolve(store).await
  }

  /// Switch term type; the selection resets as for a fresh employee pick.
  pub async fn set_term_type<S: RecordStore>(&mut self, store: &S, term_type: TermType) -> Result<()> {
    self.term_type = term_type;
    if self.employee.is_some() {
      self.resolve(store).await
    } else {
      self.reset_selection();
      Ok(())
    }
  }

  async fn resolve<S: RecordStore>(&mut self, store: &S) -> Result<()> {
    self.reset_selection();
    self.accessories = self.held.iter().cloned().collect();

    let Some(employee_id) = self.employee.as_ref().map(|e| e.employee_id) else {
      return Ok(());
    };
    if self.term_type.asset_source() != AssetSource::PickedOnly {
      let assets = store
        .list_assets(&AssetFilter::assigned_to(employee_id))
        .await
        .map_err(Error::store)?;
      self.assigned = assets.iter().map(AssetLine::from).collect();
    }
    Ok(())
  }

  fn reset_selection(&mut self) {
    self.assigned.clear();
    self.picked.clear();
    self.accessories.clear();
  }

  pub fn is_asset_selected(&self, asset_id: Uuid) -> bool {
    self.selected_assets().any(|a| a.asset_id == asset_id)
  }

  /// Add `asset` to the selection, or remove it if already picked. Returns
  /// whether it is selected afterwards.
  pub fn toggle_asset(&mut self, asset: &Asset) -> Result<bool> {
    if self.employee.is_none() {
      return Err(ValidationError::EmployeeRequired.into());
    }
    let id = asset.asset_id;
    if self.term_type.asset_source() == AssetSource::AssignedOnly
      || self.assigned.iter().any(|a| a.asset_id == id)
    {
      return Err(ValidationError::AssetLocked(id).into());
    }

    if let Some(pos) = self.picked.iter().position(|a| a.asset_id == id) {
      self.picked.remove(pos);
      return Ok(false);
    }
    if !asset.is_available() {
      return Err(ValidationError::AssetUnavailable(id).into());
    }
    self.picked.push(AssetLine::from(asset));
    Ok(true)
  }

  /// Returns whether `key` is selected afterwards.
  pub fn toggle_accessory(&mut self, key: &str) -> bool {
    if self.accessories.remove(key) {
      false
    } else {
      self.accessories.insert(key.to_owned());
      true
    }
  }

  pub fn set_accessories<I>(&mut self, keys: I)
  where
    I: IntoIterator,
    I::Item: Into<String>,
  {
    self.accessories = keys
      .into_iter()
      .map(Into::into)
      .filter(|k: &String| !k.trim().is_empty())
      .collect();
  }

  pub fn set_delivery_date(&mut self, date: NaiveDate) { self.delivery_date = date; }

  pub fn set_return_date(&mut self, date: Option<NaiveDate>) { self.return_date = date; }

  /// Selected assets in document order: assigned first, then picks in the
  /// order they were made.
  pub fn selected_assets(&self) -> impl Iterator<Item = &AssetLine> {
    self.assigned.iter().chain(self.picked.iter())
  }

  /// Selected accessory keys in document order.
  pub fn selected_accessories(&self) -> Vec<String> {
    let mut keys: Vec<String> = self.accessories.iter().cloned().collect();
    accessory::sort_keys(&mut keys);
    keys
  }

  pub fn line_items(&self) -> Vec<String> {
    self
      .selected_assets()
      .map(AssetLine::render)
      .chain(self.selected_accessories().iter().map(|k| accessory_line(k)))
      .collect()
  }

  /// Produce the document. Fails if no employee is chosen or nothing is
  /// selected.
  pub fn render(&self, today: NaiveDate) -> Result<TermDocument> {
    let employee = self.employee.as_ref().ok_or(ValidationError::EmployeeRequired)?;
    let line_items = self.line_items();
    if line_items.is_empty() {
      return Err(ValidationError::EmptySelection.into());
    }

    let return_date = self.term_type.shows_return_date().then_some(self.return_date).flatten();
    let body = template::render_body(self.term_type, &template::Fields {
      employee,
      department: &self.department_name,
      line_items: &line_items,
      delivery_date: self.delivery_date,
      return_date,
      today,
    });

    Ok(TermDocument {
      term_type: self.term_type,
      employee: employee.clone(),
      department_name: self.department_name.clone(),
      assets: self.selected_assets().cloned().collect(),
      accessories: self.selected_accessories(),
      delivery_date: self.delivery_date,
      return_date,
      issued_on: today,
      line_items,
      body,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{asset::AssetCategory, testing::MemoryStore};

  fn date(m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2025, m, d).unwrap() }

  async fn setup() -> (MemoryStore, Uuid, Asset, Asset) {
    let store = MemoryStore::new();
    let dept = store.department("Comercial").await;
    let emp = store.employee("Bruno Lima", dept.department_id).await;
    let nb = store.asset("ThinkPad T14", AssetCategory::Notebook, "TP14").await;
    let nb = store.hand_over(nb.asset_id, emp.employee_id, date(1, 5)).await;
    let phone = store.asset("iPhone 13", AssetCategory::Mobile, "IP13").await;
    (store, emp.employee_id, nb, phone)
  }

  #[tokio::test]
  async fn selecting_employee_loads_assigned_assets() {
    let (store, emp, nb, _) = setup().await;
    let mut draft = TermDraft::new(TermType::Responsibility, date(2, 1));
    draft.select_employee(&store, Some(emp)).await.unwrap();

    assert_eq!(draft.department_name(), "Comercial");
    assert!(draft.is_asset_selected(nb.asset_id));
    assert_eq!(draft.line_items().len(), 1);
  }

  #[tokio::test]
  async fn assigned_assets_are_locked() {
    let (store, emp, nb, _) = setup().await;
    let mut draft = TermDraft::new(TermType::Responsibility, date(2, 1));
    draft.select_employee(&store, Some(emp)).await.unwrap();

    let err = draft.toggle_asset(&nb).unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::AssetLocked(_))));
  }

  #[tokio::test]
  async fn picked_assets_toggle() {
    let (store, emp, _, phone) = setup().await;
    let mut draft = TermDraft::new(TermType::Requisition, date(2, 1));
    draft.select_employee(&store, Some(emp)).await.unwrap();

    assert!(draft.toggle_asset(&phone).unwrap());
    assert!(draft.is_asset_selected(phone.asset_id));
    assert!(!draft.toggle_asset(&phone).unwrap());
    assert!(!draft.is_asset_selected(phone.asset_id));
  }

  #[tokio::test]
  async fn return_terms_are_read_only() {
    let (store, emp, _, phone) = setup().await;
    let mut draft = TermDraft::new(TermType::Return, date(2, 1));
    draft.select_employee(&store, Some(emp)).await.unwrap();
    assert!(draft.toggle_asset(&phone).is_err());
  }

  #[tokio::test]
  async fn changing_type_resets_selection() {
    let (store, emp, nb, phone) = setup().await;
    let mut draft = TermDraft::new(TermType::Responsibility, date(2, 1));
    draft.select_employee(&store, Some(emp)).await.unwrap();
    draft.toggle_asset(&phone).unwrap();
    draft.toggle_accessory("webcam");

    draft.set_term_type(&store, TermType::Requisition).await.unwrap();
    assert!(!draft.is_asset_selected(nb.asset_id));
    assert!(!draft.is_asset_selected(phone.asset_id));
    assert!(draft.selected_accessories().is_empty());
  }

  #[tokio::test]
  async fn clearing_employee_blocks_render() {
    let (store, emp, _, _) = setup().await;
    let mut draft = TermDraft::new(TermType::Responsibility, date(2, 1));
    draft.select_employee(&store, Some(emp)).await.unwrap();
    draft.select_employee(&store, None).await.unwrap();

    assert!(draft.employee().is_none());
    let err = draft.render(date(2, 2)).unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::EmployeeRequired)));
  }

  #[tokio::test]
  async fn return_date_only_rendered_for_requisition() {
    let (store, emp, _, phone) = setup().await;
    let mut draft = TermDraft::new(TermType::Requisition, date(2, 1));
    draft.select_employee(&store, Some(emp)).await.unwrap();
    draft.toggle_asset(&phone).unwrap();
    draft.set_return_date(Some(date(6, 30)));

    let doc = draft.render(date(2, 2)).unwrap();
    assert_eq!(doc.return_date, Some(date(6, 30)));
    assert!(doc.body.contains("Data de Devolução: 30/06/2025"));

    draft.set_term_type(&store, TermType::Responsibility).await.unwrap();
    let doc = draft.render(date(2, 2)).unwrap();
    assert_eq!(doc.return_date, None);
  }
}
