//! @ai:module:intent Structural and cross-reference checks of the benchmark dataset
//! @ai:module:layer application
//! @ai:module:public_api DatasetValidator, Dataset, ValidationReport, ValidationIssue, Severity
//! @ai:module:stateless true

use crate::config::{PathConfig, ValidationConfig};
use crate::dataset::{
    CompanyMeta, DatabaseDefinition, DatasetLoader, DocumentSet, GroundTruth, QuestionCategory,
    RubricSet,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

const COMPANY_META_SECTIONS: [&str; 5] = [
    "meta",
    "evaluation_questions",
    "company_fundamentals",
    "financial_patterns",
    "client_patterns",
];
const SCHEMA_TABLES: [&str; 7] = [
    "employees",
    "clients",
    "contacts",
    "projects",
    "time_entries",
    "invoices",
    "expenses",
];
const DATA_TABLES: [&str; 5] = ["employees", "clients", "contacts", "projects", "invoices"];
const EMPLOYEE_FIELDS: [&str; 5] = ["id", "name", "email", "role", "hourly_rate"];
const CLIENT_FIELDS: [&str; 4] = ["id", "code", "name", "status"];
const DIFFICULTIES: [&str; 2] = ["easy", "hard"];
const MIN_PDF_CONTENT_CHARS: usize = 100;
/// Planted fact shared by synthesis questions; no single question targets it.
const SYNTHESIS_FACT: &str = "multi_fact_synthesis";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// @ai:intent One problem found in a dataset file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Dataset file or area, e.g. "documents"
    pub scope: String,
    pub message: String,
}

/// @ai:intent All issues found by a validation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn error(&mut self, scope: &str, message: impl Into<String>) {
        self.push(Severity::Error, scope, message);
    }

    pub fn warning(&mut self, scope: &str, message: impl Into<String>) {
        self.push(Severity::Warning, scope, message);
    }

    fn push(&mut self, severity: Severity, scope: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            severity,
            scope: scope.to_string(),
            message: message.into(),
        });
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    /// @ai:intent True when no error-level issue was found
    /// @ai:effects pure
    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none()
    }
}

/// @ai:intent The dataset files available for validation; absent files skip their checks
#[derive(Debug, Default)]
pub struct Dataset {
    pub documents: Option<DocumentSet>,
    pub ground_truth: Option<GroundTruth>,
    pub rubrics: Option<RubricSet>,
    pub database: Option<DatabaseDefinition>,
    pub company_meta: Option<CompanyMeta>,
}

impl Dataset {
    /// @ai:intent Load every dataset file; unreadable files become error issues
    /// @ai:effects fs:read
    pub fn load(
        loader: &dyn DatasetLoader,
        paths: &PathConfig,
        report: &mut ValidationReport,
    ) -> Self {
        Self {
            documents: load_file(report, &paths.documents, |p| loader.load_documents(p)),
            ground_truth: load_file(report, &paths.ground_truth, |p| loader.load_ground_truth(p)),
            rubrics: load_file(report, &paths.rubrics, |p| {
                loader.load_rubrics(p).map(|r| r.unwrap_or_default())
            }),
            database: load_file(report, &paths.database, |p| loader.load_database(p)),
            company_meta: load_file(report, &paths.company_meta, |p| loader.load_company_meta(p)),
        }
    }
}

fn load_file<T>(
    report: &mut ValidationReport,
    path: &Path,
    load: impl FnOnce(&Path) -> crate::error::Result<T>,
) -> Option<T> {
    if !path.exists() {
        report.error("files", format!("{} not found", path.display()));
        return None;
    }
    match load(path) {
        Ok(value) => Some(value),
        Err(e) => {
            report.error("files", e.to_string());
            None
        }
    }
}

/// @ai:intent Runs every dataset check and collects issues
pub struct DatasetValidator {
    config: ValidationConfig,
}

impl DatasetValidator {
    /// @ai:intent Create a validator with the allowed timestamp window
    /// @ai:effects pure
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// @ai:intent Load the dataset from disk and validate it
    /// @ai:effects fs:read
    pub fn validate_paths(&self, loader: &dyn DatasetLoader, paths: &PathConfig) -> ValidationReport {
        let mut load_report = ValidationReport::default();
        let dataset = Dataset::load(loader, paths, &mut load_report);
        let mut report = self.validate(&dataset);
        load_report.issues.append(&mut report.issues);
        load_report
    }

    /// @ai:intent Validate every file present in the dataset
    /// @ai:effects pure
    pub fn validate(&self, dataset: &Dataset) -> ValidationReport {
        let mut report = ValidationReport::default();

        if let Some(documents) = &dataset.documents {
            self.validate_documents(documents, &mut report);
        }
        if let Some(ground_truth) = &dataset.ground_truth {
            self.validate_ground_truth(
                ground_truth,
                dataset.rubrics.as_ref(),
                dataset.documents.as_ref(),
                &mut report,
            );
            if let Some(documents) = &dataset.documents {
                self.validate_cross_references(documents, ground_truth, &mut report);
            }
        }
        if let Some(rubrics) = &dataset.rubrics {
            self.validate_rubrics(rubrics, &mut report);
        }
        if let Some(database) = &dataset.database {
            self.validate_database(database, &mut report);
        }
        if let Some(company_meta) = &dataset.company_meta {
            self.validate_company_meta(company_meta, &mut report);
        }

        tracing::info!(
            "Validation finished: {} errors, {} warnings",
            report.errors().count(),
            report.warnings().count()
        );
        report
    }

    /// @ai:intent Ids, required fields, timestamps and PDF content of documents.json
    /// @ai:effects pure
    pub fn validate_documents(&self, documents: &DocumentSet, report: &mut ValidationReport) {
        const SCOPE: &str = "documents";

        let mut seen = HashSet::new();
        for doc in &documents.documents {
            if doc.id.is_empty() {
                report.error(SCOPE, "document without id");
                continue;
            }
            if !seen.insert(doc.id.as_str()) {
                report.error(SCOPE, format!("duplicate document id {}", doc.id));
            }

            for (field, present) in [
                ("type", doc.doc_type.is_some()),
                ("timestamp", doc.timestamp.is_some()),
                ("author", doc.author.is_some()),
            ] {
                if !present {
                    report.error(SCOPE, format!("{} missing {}", doc.id, field));
                }
            }
            if doc.clients_mentioned.is_none() {
                report.warning(SCOPE, format!("{} missing clients_mentioned", doc.id));
            }
            if doc.planted_facts.is_none() {
                report.warning(SCOPE, format!("{} missing planted_facts", doc.id));
            }

            if let Some(raw) = &doc.timestamp {
                match doc.parsed_timestamp() {
                    Ok(ts) => {
                        let local = ts.naive_local();
                        if local < self.config.timestamp_start || local > self.config.timestamp_end {
                            report.error(
                                SCOPE,
                                format!("{} timestamp {} out of range", doc.id, raw),
                            );
                        }
                    }
                    Err(e) => report.error(SCOPE, e.to_string()),
                }
            }

            if doc.is_pdf() {
                if doc.title.is_none() {
                    report.error(SCOPE, format!("PDF {} missing title", doc.id));
                }
                let content_chars = doc.content.as_deref().map(|c| c.chars().count());
                match content_chars {
                    None => report.error(SCOPE, format!("PDF {} missing content", doc.id)),
                    Some(n) if n <= MIN_PDF_CONTENT_CHARS => {
                        report.error(SCOPE, format!("PDF {} content too short", doc.id))
                    }
                    _ => {}
                }
                if !DIFFICULTIES.contains(&doc.pdf_difficulty.as_deref().unwrap_or("")) {
                    report.error(SCOPE, format!("PDF {} has invalid pdf_difficulty", doc.id));
                }
            }
        }

        let ids: BTreeSet<&str> = documents.documents.iter().map(|d| d.id.as_str()).collect();
        let expected: BTreeSet<String> = (1..=ids.len()).map(|i| format!("doc_{:03}", i)).collect();
        if ids.len() == seen.len() && !ids.iter().all(|id| expected.contains(*id)) {
            report.warning(
                SCOPE,
                format!("document ids are not sequential doc_001..doc_{:03}", ids.len()),
            );
        }
    }

    /// @ai:intent Per-category question requirements of ground_truth.json
    /// @ai:effects pure
    pub fn validate_ground_truth(
        &self,
        ground_truth: &GroundTruth,
        rubrics: Option<&RubricSet>,
        documents: Option<&DocumentSet>,
        report: &mut ValidationReport,
    ) {
        const SCOPE: &str = "ground_truth";

        let mut seen = HashSet::new();
        for (_, question) in ground_truth.iter() {
            if !question.id.is_empty() && !seen.insert(question.id.as_str()) {
                report.error(SCOPE, format!("duplicate question id {}", question.id));
            }
        }

        for question in ground_truth.questions(QuestionCategory::ExactMatchQuestions) {
            if question.expected_answer.is_none() {
                report.error(SCOPE, format!("{} missing expected_answer", question.id));
            }
        }

        for question in ground_truth.questions(QuestionCategory::QualitativeQuestions) {
            match (&question.rubric_id, rubrics) {
                (None, _) => report.error(SCOPE, format!("{} missing rubric_id", question.id)),
                (Some(id), Some(set)) if set.get(id).is_none() => {
                    report.error(SCOPE, format!("rubric {} not found", id))
                }
                _ => {}
            }
        }

        let pdf_ids: Option<HashSet<&str>> = documents.map(|set| {
            set.documents
                .iter()
                .filter(|d| d.is_pdf())
                .map(|d| d.id.as_str())
                .collect()
        });
        for question in ground_truth.questions(QuestionCategory::OcrQuestions) {
            if question.requires_ocr != Some(true) {
                report.error(SCOPE, format!("{} missing requires_ocr", question.id));
            }
            if !DIFFICULTIES.contains(&question.ocr_difficulty.as_deref().unwrap_or("")) {
                report.error(SCOPE, format!("{} has invalid ocr_difficulty", question.id));
            }
            if let Some(pdf_ids) = &pdf_ids {
                for doc_id in &question.source_documents {
                    if !pdf_ids.contains(doc_id.as_str()) {
                        report.error(
                            SCOPE,
                            format!("{} references non-PDF {}", question.id, doc_id),
                        );
                    }
                }
            }
        }

        for question in ground_truth.questions(QuestionCategory::DatabaseQuestions) {
            if question.sql_hint.is_none() {
                report.error(SCOPE, format!("{} missing sql_hint", question.id));
            }
        }

        for question in ground_truth.questions(QuestionCategory::MultiHopDbDocQuestions) {
            if question.reasoning_steps.is_none() {
                report.error(SCOPE, format!("{} missing reasoning_steps", question.id));
            }
            if question.db_tables.is_none() {
                report.error(SCOPE, format!("{} missing db_tables", question.id));
            }
        }
    }

    /// @ai:intent Planted facts are targeted by questions; OCR facts live in PDFs
    /// @ai:effects pure
    pub fn validate_cross_references(
        &self,
        documents: &DocumentSet,
        ground_truth: &GroundTruth,
        report: &mut ValidationReport,
    ) {
        const SCOPE: &str = "cross_reference";

        let planted_in_docs: BTreeSet<&str> = documents
            .documents
            .iter()
            .flat_map(|d| d.planted().iter().map(String::as_str))
            .collect();
        let targeted: HashSet<&str> = ground_truth
            .iter()
            .filter_map(|(_, q)| q.planted_fact_id.as_deref())
            .collect();

        for fact in planted_in_docs {
            if fact != SYNTHESIS_FACT && !targeted.contains(fact) {
                report.error(SCOPE, format!("planted fact {} has no question", fact));
            }
        }

        let pdf_facts: HashSet<&str> = documents
            .documents
            .iter()
            .filter(|d| d.is_pdf())
            .flat_map(|d| d.planted().iter().map(String::as_str))
            .collect();
        for question in ground_truth.questions(QuestionCategory::OcrQuestions) {
            if let Some(fact) = question.planted_fact_id.as_deref() {
                if !pdf_facts.contains(fact) {
                    report.error(SCOPE, format!("OCR question fact {} not in any PDF", fact));
                }
            }
        }
    }

    /// @ai:intent Every rubric declares must_mention and scoring
    /// @ai:effects pure
    pub fn validate_rubrics(&self, rubrics: &RubricSet, report: &mut ValidationReport) {
        for (name, rubric) in &rubrics.rubrics {
            if rubric.must_mention.is_none() {
                report.error("rubrics", format!("rubric {} missing must_mention", name));
            }
            if rubric.scoring.is_none() {
                report.error("rubrics", format!("rubric {} missing scoring", name));
            }
        }
    }

    /// @ai:intent Required tables, required row fields, foreign keys and invoice amounts
    /// @ai:effects pure
    pub fn validate_database(&self, database: &DatabaseDefinition, report: &mut ValidationReport) {
        const SCOPE: &str = "database";

        for table in SCHEMA_TABLES {
            if !database.schema.contains_key(table) {
                report.error(SCOPE, format!("missing table: {}", table));
            }
        }
        for table in DATA_TABLES {
            if database.rows(table).is_empty() {
                report.error(SCOPE, format!("no data in table: {}", table));
            }
        }

        for (table, fields) in [
            ("employees", &EMPLOYEE_FIELDS[..]),
            ("clients", &CLIENT_FIELDS[..]),
        ] {
            for row in database.rows(table) {
                for field in fields {
                    if !row.contains_key(*field) {
                        report.error(
                            SCOPE,
                            format!("{} row {} missing {}", table, key_of(row.get("id")), field),
                        );
                    }
                }
            }
        }

        let clients = id_set(database, "clients");
        let employees = id_set(database, "employees");
        let projects = id_set(database, "projects");

        let checks: [(&str, &str, &HashSet<String>); 4] = [
            ("projects", "client_id", &clients),
            ("invoices", "client_id", &clients),
            ("time_entries", "project_id", &projects),
            ("time_entries", "employee_id", &employees),
        ];
        for (table, column, targets) in checks {
            for row in database.rows(table) {
                let key = key_of(row.get(column));
                if !targets.contains(&key) {
                    report.error(
                        SCOPE,
                        format!(
                            "{} row {} has invalid {} {}",
                            table,
                            key_of(row.get("id")),
                            column,
                            key
                        ),
                    );
                }
            }
        }

        for invoice in database.rows("invoices") {
            let amount = invoice.get("amount_net").and_then(Value::as_f64);
            if !amount.is_some_and(|a| a > 0.0) {
                let label = invoice
                    .get("invoice_number")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| key_of(invoice.get("id")));
                report.error(SCOPE, format!("invoice {} has invalid amount", label));
            }
        }
    }

    /// @ai:intent company_meta.json carries every expected section
    /// @ai:effects pure
    pub fn validate_company_meta(&self, company_meta: &CompanyMeta, report: &mut ValidationReport) {
        for section in COMPANY_META_SECTIONS {
            if !company_meta.contains_key(section) {
                report.error("company_meta", format!("missing section {}", section));
            }
        }
    }
}

impl Default for DatasetValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

fn key_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}

fn id_set(database: &DatabaseDefinition, table: &str) -> HashSet<String> {
    database
        .rows(table)
        .into_iter()
        .map(|row| key_of(row.get("id")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn long_text() -> String {
        "Faktura VAT za usługi doradcze. ".repeat(5)
    }

    fn documents() -> DocumentSet {
        serde_json::from_value(json!({
            "meta": {},
            "documents": [
                {"id": "doc_001", "type": "email_internal", "timestamp": "2023-07-26T14:30:00+02:00",
                 "author": "Maciej Boryna", "clients_mentioned": [], "planted_facts": ["fact_a"]},
                {"id": "doc_002", "type": "scan", "format": "pdf", "timestamp": "2023-09-01",
                 "author": "Biuro", "title": "Faktura", "content": long_text(),
                 "pdf_difficulty": "hard", "clients_mentioned": ["ALF"],
                 "planted_facts": ["fact_ocr", "multi_fact_synthesis"]}
            ]
        }))
        .unwrap()
    }

    fn ground_truth() -> GroundTruth {
        serde_json::from_value(json!({
            "meta": {},
            "exact_match_questions": [
                {"id": "em001", "expected_answer": "x", "planted_fact_id": "fact_a"}
            ],
            "qualitative_questions": [{"id": "ql001", "rubric_id": "r1"}],
            "ocr_questions": [
                {"id": "ocr001", "requires_ocr": true, "ocr_difficulty": "hard",
                 "source_documents": ["doc_002"], "planted_fact_id": "fact_ocr"}
            ],
            "database_questions": [{"id": "db001", "sql_hint": "SELECT 1"}],
            "multi_hop_db_doc_questions": [
                {"id": "mh001", "reasoning_steps": ["a"], "db_tables": ["invoices"]}
            ]
        }))
        .unwrap()
    }

    fn rubrics() -> RubricSet {
        serde_json::from_value(json!({
            "rubrics": {"r1": {"must_mention": ["a"], "should_mention": [], "scoring": {"5": "all"}}}
        }))
        .unwrap()
    }

    fn database() -> DatabaseDefinition {
        let schema: serde_json::Map<String, Value> = SCHEMA_TABLES
            .iter()
            .map(|t| (t.to_string(), json!({"columns": {"id": "INTEGER"}})))
            .collect();
        serde_json::from_value(json!({
            "meta": {"database_name": "crm.db"},
            "schema": schema,
            "data": {
                "employees": [{"id": 1, "name": "A", "email": "a@x.pl", "role": "PM", "hourly_rate": 100}],
                "clients": [{"id": 1, "code": "ALF", "name": "Alfa", "status": "active"}],
                "contacts": [{"id": 1, "client_id": 1}],
                "projects": [{"id": 7, "client_id": 1}],
                "invoices": [{"id": 1, "invoice_number": "FV/1", "client_id": 1, "amount_net": 100.0}],
                "time_entries": [{"id": 1, "project_id": 7, "employee_id": 1, "hours": 8}]
            }
        }))
        .unwrap()
    }

    fn company_meta() -> CompanyMeta {
        COMPANY_META_SECTIONS
            .iter()
            .map(|s| (s.to_string(), json!({})))
            .collect()
    }

    fn full_dataset() -> Dataset {
        Dataset {
            documents: Some(documents()),
            ground_truth: Some(ground_truth()),
            rubrics: Some(rubrics()),
            database: Some(database()),
            company_meta: Some(company_meta()),
        }
    }

    fn messages(report: &ValidationReport) -> Vec<String> {
        report.issues.iter().map(|i| i.message.clone()).collect()
    }

    #[test]
    fn test_valid_dataset_has_no_issues() {
        let report = DatasetValidator::default().validate(&full_dataset());
        assert!(report.issues.is_empty(), "{:?}", report.issues);
        assert!(report.is_ok());
    }

    #[test]
    fn test_document_problems() {
        let mut dataset = full_dataset();
        let docs = dataset.documents.as_mut().unwrap();
        docs.documents[0].timestamp = Some("2025-01-01T00:00:00".to_string());
        docs.documents[1].pdf_difficulty = Some("medium".to_string());
        docs.documents[1].content = Some("krótko".to_string());
        let mut duplicate = docs.documents[0].clone();
        duplicate.author = None;
        docs.documents.push(duplicate);

        let report = DatasetValidator::default().validate(&dataset);
        let msgs = messages(&report);

        assert!(msgs.contains(&"doc_001 timestamp 2025-01-01T00:00:00 out of range".to_string()));
        assert!(msgs.contains(&"PDF doc_002 has invalid pdf_difficulty".to_string()));
        assert!(msgs.contains(&"PDF doc_002 content too short".to_string()));
        assert!(msgs.contains(&"duplicate document id doc_001".to_string()));
        assert!(msgs.contains(&"doc_001 missing author".to_string()));
        assert!(!report.is_ok());
    }

    #[test]
    fn test_non_sequential_ids_warn() {
        let mut dataset = full_dataset();
        dataset.documents.as_mut().unwrap().documents[1].id = "doc_005".to_string();
        // keep the OCR reference consistent so only the numbering is reported
        dataset.ground_truth.as_mut().unwrap().ocr_questions[0].source_documents =
            vec!["doc_005".to_string()];

        let report = DatasetValidator::default().validate(&dataset);
        assert_eq!(report.warnings().count(), 1);
        assert!(report.is_ok());
    }

    #[test]
    fn test_invalid_timestamp_is_reported() {
        let mut dataset = full_dataset();
        dataset.documents.as_mut().unwrap().documents[0].timestamp = Some("lipiec".to_string());
        let report = DatasetValidator::default().validate(&dataset);
        assert!(messages(&report).contains(&"Invalid timestamp in doc_001: lipiec".to_string()));
    }

    #[test]
    fn test_ground_truth_problems() {
        let mut dataset = full_dataset();
        let gt = dataset.ground_truth.as_mut().unwrap();
        gt.exact_match_questions[0].expected_answer = None;
        gt.qualitative_questions[0].rubric_id = Some("missing".to_string());
        gt.ocr_questions[0].requires_ocr = None;
        gt.ocr_questions[0].source_documents = vec!["doc_001".to_string()];
        gt.database_questions[0].sql_hint = None;
        gt.multi_hop_db_doc_questions[0].db_tables = None;
        let mut dup = gt.database_questions[0].clone();
        dup.sql_hint = Some("SELECT 2".to_string());
        gt.database_questions.push(dup);

        let report = DatasetValidator::default().validate(&dataset);
        let msgs = messages(&report);

        assert!(msgs.contains(&"em001 missing expected_answer".to_string()));
        assert!(msgs.contains(&"rubric missing not found".to_string()));
        assert!(msgs.contains(&"ocr001 missing requires_ocr".to_string()));
        assert!(msgs.contains(&"ocr001 references non-PDF doc_001".to_string()));
        assert!(msgs.contains(&"db001 missing sql_hint".to_string()));
        assert!(msgs.contains(&"mh001 missing db_tables".to_string()));
        assert!(msgs.contains(&"duplicate question id db001".to_string()));
    }

    #[test]
    fn test_untargeted_planted_fact() {
        let mut dataset = full_dataset();
        dataset.ground_truth.as_mut().unwrap().exact_match_questions[0].planted_fact_id = None;
        let report = DatasetValidator::default().validate(&dataset);
        assert_eq!(messages(&report), vec!["planted fact fact_a has no question".to_string()]);
    }

    #[test]
    fn test_ocr_fact_outside_pdf() {
        let mut dataset = full_dataset();
        dataset.ground_truth.as_mut().unwrap().ocr_questions[0].planted_fact_id =
            Some("fact_a".to_string());
        let report = DatasetValidator::default().validate(&dataset);
        assert!(messages(&report).contains(&"OCR question fact fact_a not in any PDF".to_string()));
    }

    #[test]
    fn test_rubric_problems() {
        let mut dataset = full_dataset();
        let rubric = dataset.rubrics.as_mut().unwrap().rubrics.get_mut("r1").unwrap();
        rubric.must_mention = None;
        rubric.scoring = None;
        let report = DatasetValidator::default().validate(&dataset);
        assert_eq!(
            messages(&report),
            vec![
                "rubric r1 missing must_mention".to_string(),
                "rubric r1 missing scoring".to_string()
            ]
        );
    }

    #[test]
    fn test_database_problems() {
        let database: DatabaseDefinition = serde_json::from_value(json!({
            "meta": {"database_name": "crm.db"},
            "schema": {"employees": {"columns": {"id": "INTEGER"}}},
            "data": {
                "employees": [{"id": 1, "name": "A"}],
                "clients": [{"id": 1, "code": "ALF", "name": "Alfa", "status": "active"}],
                "projects": [{"id": 7, "client_id": 2}],
                "invoices": [{"id": 3, "invoice_number": "FV/9", "client_id": 1, "amount_net": 0}],
                "time_entries": [{"id": 4, "project_id": 7, "employee_id": 9}]
            }
        }))
        .unwrap();

        let mut report = ValidationReport::default();
        DatasetValidator::default().validate_database(&database, &mut report);
        let msgs = messages(&report);

        assert!(msgs.contains(&"missing table: clients".to_string()));
        assert!(msgs.contains(&"no data in table: contacts".to_string()));
        assert!(msgs.contains(&"employees row 1 missing email".to_string()));
        assert!(msgs.contains(&"projects row 7 has invalid client_id 2".to_string()));
        assert!(msgs.contains(&"time_entries row 4 has invalid employee_id 9".to_string()));
        assert!(msgs.contains(&"invoice FV/9 has invalid amount".to_string()));
    }

    #[test]
    fn test_validate_paths_reports_missing_files() {
        use crate::dataset::JsonDatasetLoader;

        let temp = tempfile::TempDir::new().unwrap();
        let paths = PathConfig {
            ground_truth: temp.path().join("ground_truth.json"),
            rubrics: temp.path().join("qualitative_rubric.json"),
            documents: temp.path().join("documents.json"),
            database: temp.path().join("database.json"),
            company_meta: temp.path().join("company_meta.json"),
            output_dir: temp.path().join("output"),
        };
        std::fs::write(
            &paths.company_meta,
            serde_json::to_string(&company_meta()).unwrap(),
        )
        .unwrap();
        std::fs::write(&paths.documents, "{not json").unwrap();

        let report = DatasetValidator::default().validate_paths(&JsonDatasetLoader::new(), &paths);

        assert_eq!(report.errors().count(), 4);
        assert!(report.issues.iter().all(|i| i.scope == "files"));
        assert!(report.issues[0].message.contains("documents.json"));
    }

    #[test]
    fn test_company_meta_sections() {
        let mut meta = company_meta();
        meta.remove("financial_patterns");
        let mut report = ValidationReport::default();
        DatasetValidator::default().validate_company_meta(&meta, &mut report);
        assert_eq!(messages(&report), vec!["missing section financial_patterns".to_string()]);
    }
}
