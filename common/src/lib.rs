//! InfraCheck Common Library
//!
//! CLIと結合テストで共有されるチェックリスト型・結論文生成・レポート出力

pub mod types;
pub mod commands;
pub mod conclusion;
pub mod locations;
pub mod store;
pub mod layout;
pub mod error;
pub mod export;

pub use types::{
    AntennaBrand, AntennaDevice, AntennaVendor, Brand, CableCondition, ChecklistRecord,
    FirewallBrand, FirewallVendor, ItemId, KnownBrand, ProblematicMachine, SwitchDevice,
};
pub use commands::{
    clamp_quantity, validate_for_report, AntennaPatch, FirewallChoice, MachinePatch, SwitchPatch,
};
pub use conclusion::{generate_conclusion, ConclusionSummary};
pub use locations::{LocationIndex, BASELINE_LOCATIONS};
pub use store::{ChecklistRepository, KeyValueStore, MemoryStore, VisitEntry};
pub use layout::PdfLayout;
pub use error::{Error, RequiredField, Result, ValidationError};
pub use export::{render_doc, render_pdf, render_text, report_file_name, ReportKind};
