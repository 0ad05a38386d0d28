//! Parse, render, parse again: the product identity must survive.

use ingestion::{parse_identifier, render_identifier};
use radar_common::SourceFormat;
use test_utils::{filenames, object_keys, wfs, wms};

fn assert_identity_survives(raw: &str, source: SourceFormat) {
    let first = parse_identifier(raw, source).unwrap();
    let rendered = render_identifier(&first).unwrap();
    let second = parse_identifier(&rendered, SourceFormat::DirectoryScan)
        .unwrap_or_else(|e| panic!("re-parse of {} failed: {}", rendered, e));

    assert_eq!(first.site, second.site, "{}", raw);
    assert_eq!(first.product_type, second.product_type, "{}", raw);
    assert_eq!(first.product_subtype, second.product_subtype, "{}", raw);
    assert_eq!(first.timestamp, second.timestamp, "{}", raw);
    assert_eq!(first.flavor_key(), second.flavor_key(), "{}", raw);
}

#[test]
fn test_filenames_survive_rendering() {
    for name in filenames::ALL {
        assert_identity_survives(name, SourceFormat::DirectoryScan);
    }
}

#[test]
fn test_other_grammars_survive_rendering() {
    assert_identity_survives(object_keys::PPI_FIKAU, SourceFormat::ObjectStoreKey);
    assert_identity_survives(object_keys::CAPPI_FIKAU, SourceFormat::ObjectStoreKey);
    assert_identity_survives(wms::PPI_FIKAU, SourceFormat::WmsLayer);
    assert_identity_survives(wms::ETOP_FIKAU, SourceFormat::WmsLayer);
    assert_identity_survives(wms::RR_FINRAD, SourceFormat::WmsLayer);
    assert_identity_survives(wfs::PPI_FIKAU, SourceFormat::WfsFeature);
    assert_identity_survives(wfs::COMPOSITE_ACRR, SourceFormat::WfsFeature);
}

#[test]
fn test_rendering_a_filename_is_its_stem() {
    let d = parse_identifier(filenames::ETOP_FIKAU_MINUS_10, SourceFormat::DirectoryScan).unwrap();
    assert_eq!(
        render_identifier(&d).unwrap(),
        "202601240000_fikau_etop_-10_dbzh_qc"
    );
}
