//! The fixed accessory catalog.
//!
//! Accessories are peripherals tracked per employee as plain boolean flags,
//! independent of asset records. Catalog order is the order accessories are
//! listed on term documents.

/// A catalog entry: the key stored in an employee's accessory map and the
/// name printed on documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accessory {
  pub key:  &'static str,
  pub name: &'static str,
}

pub const CATALOG: &[Accessory] = &[
  Accessory { key: "teclado", name: "Teclado" },
  Accessory { key: "mouse", name: "Mouse" },
  Accessory { key: "base de notebook", name: "Base para notebook" },
  Accessory { key: "fone", name: "Fone de Ouvido" },
  Accessory { key: "webcam", name: "Webcam" },
  Accessory { key: "mousepad", name: "Mousepad" },
  Accessory { key: "cabo_hdmi", name: "Cabo HDMI" },
  Accessory { key: "carregador", name: "Carregador" },
  Accessory { key: "outros", name: "Outros Acessórios" },
];

pub fn lookup(key: &str) -> Option<&'static Accessory> {
  CATALOG.iter().find(|a| a.key == key)
}

/// Display name for `key`; keys outside the catalog display as themselves.
pub fn display_name(key: &str) -> &str {
  lookup(key).map_or(key, |a| a.name)
}

/// Position of `key` in the catalog, or `None` for unknown keys.
pub fn position(key: &str) -> Option<usize> {
  CATALOG.iter().position(|a| a.key == key)
}

/// Sort accessory keys into document order: catalog entries first in
/// declaration order, then unknown keys alphabetically.
pub fn sort_keys(keys: &mut [String]) {
  keys.sort_by(|a, b| match (position(a), position(b)) {
    (Some(x), Some(y)) => x.cmp(&y),
    (Some(_), None) => std::cmp::Ordering::Less,
    (None, Some(_)) => std::cmp::Ordering::Greater,
    (None, None) => a.cmp(b),
  });
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sort_follows_catalog_then_alphabetical() {
    let mut keys: Vec<String> = ["zz", "fone", "aa", "teclado", "outros"]
      .into_iter()
      .map(str::to_owned)
      .collect();
    sort_keys(&mut keys);
    assert_eq!(keys, ["teclado", "fone", "outros", "aa", "zz"]);
  }

  #[test]
  fn unknown_key_displays_as_itself() {
    assert_eq!(display_name("fone"), "Fone de Ouvido");
    assert_eq!(display_name("tablet-stand"), "tablet-stand");
  }
}
