use serde::Serialize;
use std::collections::BTreeMap;

use crate::process::utils::coerce_count;

/// One traffic-closure record, i.e. one data line of the exported sheet.
///
/// Every recognized column is a named member; anything else the sheet grows
/// later lands in `extra`, keyed by its trimmed header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    pub inputdate: String,
    pub blockdate: String,
    pub const_name: String,
    pub direction: String,
    /// Lane / shoulder designation (이정).
    pub ieejung: String,
    /// Closure time window.
    pub chadantime: String,
    /// Blocked segments: plain text or a JSON array of strings.
    pub chadan: String,
    pub workers: u32,
    pub signcar: u32,
    pub workcar: u32,
    pub employee: String,
    pub employeephone: String,
    pub contractee: String,
    pub sitemanager: String,
    pub smcellphone: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Row {
    /// Assign a cleaned token to the member named by `header`.
    pub(crate) fn set(&mut self, header: &str, value: String) {
        match header {
            "inputdate" => self.inputdate = value,
            "blockdate" => self.blockdate = value,
            "const_name" => self.const_name = value,
            "direction" => self.direction = value,
            "ieejung" => self.ieejung = value,
            "chadantime" => self.chadantime = value,
            "chadan" => self.chadan = value,
            "workers" => self.workers = coerce_count(&value),
            "signcar" => self.signcar = coerce_count(&value),
            "workcar" => self.workcar = coerce_count(&value),
            "employee" => self.employee = value,
            "employeephone" => self.employeephone = value,
            "contractee" => self.contractee = value,
            "sitemanager" => self.sitemanager = value,
            "smcellphone" => self.smcellphone = value,
            other => {
                self.extra.insert(other.to_string(), value);
            }
        }
    }
}
