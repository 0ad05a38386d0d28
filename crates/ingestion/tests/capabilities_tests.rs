//! Tests for WMS capabilities extraction.

use ingestion::{extract_wms_layers, parse_batch, BatchSummary, CapabilitiesError};
use radar_common::SourceFormat;
use test_utils::wms;

#[test]
fn test_extracts_one_identifier_per_layer_and_level() {
    let identifiers = extract_wms_layers(wms::CAPABILITIES).unwrap();

    let raws: Vec<&str> = identifiers.iter().map(|i| i.raw.as_str()).collect();
    assert_eq!(
        raws,
        vec![
            "LAYERS=Radar%3Afikau_dbzh&TIME=2026-01-24T00%3A05%3A00Z&ELEVATION=0.3",
            "LAYERS=Radar%3Afikau_dbzh&TIME=2026-01-24T00%3A05%3A00Z&ELEVATION=0.7",
            "LAYERS=Radar%3Afinrad_rr1h&TIME=2026-01-24T00%3A00%3A00Z&HEIGHT=600",
        ]
    );
    assert!(identifiers.iter().all(|i| i.source == SourceFormat::WmsLayer));
}

#[test]
fn test_extracted_identifiers_parse() {
    let identifiers = extract_wms_layers(wms::CAPABILITIES).unwrap();
    let outcomes = parse_batch(&identifiers);
    let summary = BatchSummary::from_outcomes(&outcomes);

    assert_eq!(summary.parsed, 3);
    assert_eq!(summary.failed, 0);

    let acrr = outcomes[2].as_ref().unwrap();
    assert_eq!(acrr.site, "finrad");
    assert_eq!(acrr.product_type, "ACRR mm");
    assert!(acrr.composite);
}

#[test]
fn test_layer_without_time_is_skipped() {
    let xml = r#"<WMS_Capabilities><Capability>
        <Layer queryable="1"><Name>fikau_dbzh</Name>
          <Dimension name="elevation">0.3</Dimension>
        </Layer>
    </Capability></WMS_Capabilities>"#;
    assert!(extract_wms_layers(xml).unwrap().is_empty());
}

#[test]
fn test_child_layers_inherit_dimensions() {
    let xml = r#"<WMS_Capabilities><Capability>
        <Layer>
          <Dimension name="TIME">2026-01-24T00:00:00Z</Dimension>
          <Layer queryable="true"><Name>fivan_vrad</Name>
            <Dimension name="ELEVATION">0.5</Dimension>
          </Layer>
        </Layer>
    </Capability></WMS_Capabilities>"#;
    let identifiers = extract_wms_layers(xml).unwrap();
    assert_eq!(identifiers.len(), 1);
    assert_eq!(
        identifiers[0].raw,
        "LAYERS=fivan_vrad&TIME=2026-01-24T00%3A00%3A00Z&ELEVATION=0.5"
    );
}

#[test]
fn test_malformed_xml_is_an_error() {
    let result = extract_wms_layers("<Layer><Name>x</Layer>");
    assert!(matches!(result, Err(CapabilitiesError::Xml { .. })));
}
