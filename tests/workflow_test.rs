//! Integration tests for the EDI workflow

use edi::core::validation::{DataModel, LoaderRegistry};
use edi::core::workflow::{
    EdiWorkflow, Enricher, RunOptions, WorkflowState, WORKFLOW_ERROR_MESSAGE,
};
use edi::domain::{
    load_message_from_file, EdiError, EdiMessageFormat, EdiMessageMetadata, EdiOperation,
    ErrorKind, InputMessage, Result, DEFAULT_UTF8_SAMPLE_SIZE,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use test_case::test_case;

fn load_fixture(name: &str) -> InputMessage {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    load_message_from_file(path, DEFAULT_UTF8_SAMPLE_SIZE).unwrap()
}

#[derive(Default)]
struct CountingEnricher {
    calls: AtomicUsize,
}

impl Enricher for CountingEnricher {
    fn enrich(&self, _message: &InputMessage, metadata: &EdiMessageMetadata) -> Result<()> {
        assert_eq!(metadata.edi_message_format, EdiMessageFormat::X12);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test_case("adt_a01_26.hl7", EdiMessageFormat::Hl7 ; "hl7")]
#[test_case("270.x12", EdiMessageFormat::X12 ; "x12")]
#[test_case("patient.json", EdiMessageFormat::Fhir ; "fhir json")]
#[test_case("patient.xml", EdiMessageFormat::Fhir ; "fhir xml")]
#[test_case("bundle.json", EdiMessageFormat::Fhir ; "fhir bundle")]
fn test_run_completes_fixtures(name: &str, format: EdiMessageFormat) {
    let mut workflow = EdiWorkflow::new(load_fixture(name));
    let result = workflow.run(RunOptions::default());

    assert!(result.is_successful(), "unexpected errors: {:?}", result.errors);
    assert_eq!(workflow.state(), WorkflowState::Completed);
    assert_eq!(
        result.operations,
        vec![
            EdiOperation::Analyze,
            EdiOperation::Enrich,
            EdiOperation::Validate,
            EdiOperation::Translate,
            EdiOperation::Complete
        ]
    );
    assert_eq!(result.metadata.map(|m| m.edi_message_format), Some(format));
    assert_eq!(workflow.data_model().map(DataModel::format), Some(format));
}

#[test_case("adt_a01_26.hl7", EdiMessageFormat::Hl7 ; "hl7")]
#[test_case("270.x12", EdiMessageFormat::X12 ; "x12")]
fn test_lowercase_segment_ids_complete(name: &str, format: EdiMessageFormat) {
    let text = load_fixture(name).as_text().unwrap().to_ascii_lowercase();
    // GS08 keeps its upper-case X so the version split still applies
    let text = text.replace("005010x279a1", "005010X279A1");

    let mut workflow = EdiWorkflow::new(text);
    let result = workflow.run(RunOptions::default());

    assert!(result.is_successful(), "unexpected errors: {:?}", result.errors);
    assert_eq!(result.metadata.map(|m| m.edi_message_format), Some(format));
    assert_eq!(workflow.data_model().map(DataModel::format), Some(format));
}

#[test]
fn test_x12_model_from_validate() {
    let mut workflow = EdiWorkflow::new(load_fixture("270.x12"));
    workflow.analyze().unwrap();
    workflow.validate().unwrap();

    match workflow.data_model() {
        Some(DataModel::X12(model)) => {
            assert_eq!(model.len(), 17);
            assert_eq!(model.transaction_sets(), vec!["270"]);
        }
        other => panic!("unexpected model {other:?}"),
    }
}

#[test]
fn test_run_skips_disabled_stages() {
    let mut workflow = EdiWorkflow::new(load_fixture("patient.json"));
    let result = workflow.run(RunOptions {
        enrich: false,
        validate: true,
        translate: false,
    });

    assert_eq!(
        result.operations,
        vec![EdiOperation::Analyze, EdiOperation::Validate, EdiOperation::Complete]
    );
    assert_eq!(result.metrics.enrich_time(), 0.0);
    assert_eq!(result.metrics.translate_time(), 0.0);
}

#[test]
fn test_run_never_raises_for_malformed_input() {
    let mut workflow = EdiWorkflow::new("this is not an edi message");
    let result = workflow.run(RunOptions::default());

    assert_eq!(workflow.state(), WorkflowState::Failed);
    assert!(result.metadata.is_none());
    assert_eq!(result.operations, vec![EdiOperation::Fail]);
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.errors[0].msg, WORKFLOW_ERROR_MESSAGE);
    assert_eq!(result.errors[0].kind, ErrorKind::Workflow);
    assert_eq!(result.errors[1].kind, ErrorKind::DataValidation);
    assert!(result.has_input_errors());
}

#[test]
fn test_validate_failure_keeps_metadata() {
    // GS/GE don't balance, which analysis doesn't check
    let message = "ISA*00*          *00*          *ZZ*S              *ZZ*R              *240101*1200*^*00501*000000001*0*P*:~\
                   GS*HS*S*R*20240101*1200*1*X*005010X279A1~ST*270*0001~SE*2*0001~IEA*1*000000001~";

    let mut workflow = EdiWorkflow::new(message);
    let result = workflow.run(RunOptions::default());

    assert_eq!(workflow.state(), WorkflowState::Failed);
    assert_eq!(
        result.metadata.as_ref().map(|m| m.specification_version.as_deref()),
        Some(Some("005010"))
    );
    assert_eq!(
        result.operations,
        vec![EdiOperation::Analyze, EdiOperation::Enrich, EdiOperation::Fail]
    );
    assert_eq!(result.errors[1].kind, ErrorKind::DataValidation);
    assert!(workflow.data_model().is_none());
}

#[test]
fn test_cancel_immediately_after_construction() {
    let mut workflow = EdiWorkflow::new(load_fixture("adt_a01_26.hl7"));
    let result = workflow.cancel().unwrap();

    assert!(result.metadata.is_none());
    assert_eq!(result.metrics.analyze_time(), 0.0);
    assert!(result.errors.is_empty());
    assert_eq!(result.operations, vec![EdiOperation::Cancel]);
    assert_eq!(workflow.state(), WorkflowState::Cancelled);
}

#[test]
fn test_validate_before_analyze_is_invalid_transition() {
    let mut workflow = EdiWorkflow::new(load_fixture("adt_a01_26.hl7"));
    let err = workflow.validate().unwrap_err();

    assert!(matches!(err, EdiError::InvalidTransition { .. }));
    assert_eq!(workflow.state(), WorkflowState::Init);
    assert!(workflow.is_active());
}

#[test]
fn test_complete_before_analyze_is_invalid_transition() {
    let mut workflow = EdiWorkflow::new(load_fixture("adt_a01_26.hl7"));
    assert!(matches!(
        workflow.complete(),
        Err(EdiError::InvalidTransition { .. })
    ));
}

#[test]
fn test_total_time_after_every_stage() {
    let mut workflow = EdiWorkflow::new(load_fixture("270.x12"));
    let check = |workflow: &EdiWorkflow| {
        let m = workflow.metrics();
        assert_eq!(
            m.total_time(),
            m.analyze_time() + m.enrich_time() + m.validate_time() + m.translate_time()
        );
    };

    check(&workflow);
    workflow.analyze().unwrap();
    check(&workflow);
    workflow.enrich().unwrap();
    check(&workflow);
    workflow.validate().unwrap();
    check(&workflow);
    workflow.translate().unwrap();
    check(&workflow);
}

#[test]
fn test_custom_enricher_and_shared_registry() {
    let enricher = Arc::new(CountingEnricher::default());
    let registry = Arc::new(LoaderRegistry::default());

    for _ in 0..3 {
        let mut workflow = EdiWorkflow::new(load_fixture("270.x12"))
            .with_enricher(enricher.clone())
            .with_loaders(Arc::clone(&registry));
        assert!(workflow.run(RunOptions::default()).is_successful());
    }

    assert_eq!(enricher.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_workflows_run_in_parallel_threads() {
    let names = ["adt_a01_26.hl7", "270.x12", "patient.json", "patient.xml"];
    let handles: Vec<_> = names
        .iter()
        .map(|name| {
            let message = load_fixture(name);
            std::thread::spawn(move || EdiWorkflow::new(message).run(RunOptions::default()))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_successful());
    }
}

#[test]
fn test_result_document_wire_format() {
    let mut workflow = EdiWorkflow::new(load_fixture("bundle.json")).include_input_message(true);
    let result = workflow.run(RunOptions::default());
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["metadata"]["ediMessageFormat"], "FHIR");
    assert_eq!(value["metadata"]["recordCount"], 3);
    assert_eq!(value["errors"], json!([]));
    assert_eq!(
        value["operations"],
        json!(["ANALYZE", "ENRICH", "VALIDATE", "TRANSLATE", "COMPLETE"])
    );
    assert!(value["metrics"]["totalTime"].is_f64());
    assert!(value["inputMessage"]
        .as_str()
        .unwrap()
        .contains("\"resourceType\": \"Bundle\""));
}

#[test]
fn test_binary_input_message_is_base64() {
    let mut bytes = vec![0u8; 128];
    bytes.extend_from_slice(b"DICM");
    bytes.extend_from_slice(&[0x02, 0x00, 0x10, 0x00, b'U', b'I', 0x02, 0x00, b'1', 0x00]);
    bytes.push(0xff);

    let mut workflow = EdiWorkflow::new(InputMessage::Binary(bytes)).include_input_message(true);
    let result = workflow.run(RunOptions::default());

    assert!(result.is_successful(), "unexpected errors: {:?}", result.errors);
    assert_eq!(result.metadata.unwrap().record_count, None);
    let echoed = result.input_message.unwrap();
    assert!(echoed.starts_with("AAAA"));
}
