use once_cell::sync::OnceCell;

/// Run-wide form-name list. Seeded from config before any virtual user
/// starts, or discovered once from the first successful login response. The
/// cell makes the discovery explicit and safe: the first writer wins and
/// later seeds are no-ops.
#[derive(Debug, Default)]
pub struct FormCatalog {
    names: OnceCell<Vec<String>>,
}

impl FormCatalog {
    #[must_use]
    pub fn from_config(forms: &[String]) -> Self {
        let catalog = Self::default();
        if !forms.is_empty() {
            drop(catalog.names.set(forms.to_vec()));
        }
        catalog
    }

    /// Seeds the catalog. Returns true when this call was the one that
    /// populated it.
    #[must_use]
    pub fn seed(&self, names: Vec<String>) -> bool {
        self.names.set(names).is_ok()
    }

    #[must_use]
    pub fn is_seeded(&self) -> bool {
        self.names.get().is_some()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        self.names.get().map_or(&[], Vec::as_slice)
    }
}
