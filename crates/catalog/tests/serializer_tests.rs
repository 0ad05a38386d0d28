//! Catalog JSON rendering.

use catalog::{aggregate, render_catalog, render_catalog_document, to_json_string, CatalogItem};
use ingestion::parse_identifier;
use radar_common::SourceFormat;
use serde_json::{json, Value};
use test_utils::{filenames, ppi_series, sample_site_directory};

fn catalog_of(names: &[impl AsRef<str>]) -> catalog::Catalog {
    let items = names.iter().map(|n| {
        let d = parse_identifier(n.as_ref(), SourceFormat::DirectoryScan).unwrap();
        CatalogItem::from_descriptor(d).unwrap()
    });
    aggregate(items, sample_site_directory()).0
}

// ============================================================================
// Document shape
// ============================================================================

#[test]
fn test_single_entry_document() {
    let catalog = catalog_of(&[filenames::PPI_FIKAU_0_3_DBZH]);

    assert_eq!(
        render_catalog_document(&catalog),
        json!({
            "radarProducts": {
                "fikau": {
                    "lon": 27.4428,
                    "lat": 68.4343,
                    "display": "Inari",
                    "products": {
                        "PPI dbZh": {
                            "display": "PPI dbZh",
                            "flavors": {
                                "0.3": {
                                    "display": "0.3",
                                    "type": "RADAR RASTER",
                                    "times": [{
                                        "time": "2026-01-24T00:00:00Z",
                                        "url": "202601240000_fikau_ppi_0.3_dbzh_qc.tiff.gz",
                                        "productInfo": {
                                            "dataType": "REFLECTIVITY",
                                            "dataUnit": "dBZ",
                                            "dataScale": {
                                                "tag": "LinearInterpolationDataScale",
                                                "offset": -32.0,
                                                "step": 0.5,
                                                "notScanned": 255,
                                                "noEcho": 0
                                            },
                                            "polarization": "HORIZONTAL",
                                            "productType": "PPI",
                                            "productSubtype": "EL 0.3°"
                                        }
                                    }]
                                }
                            }
                        }
                    }
                }
            }
        })
    );
}

#[test]
fn test_unknown_site_renders_null_coordinates() {
    let catalog = catalog_of(&[filenames::COMPOSITE_ACRR_1H]);
    let rendered = render_catalog(&catalog);

    let site = &rendered["finradfast"];
    assert_eq!(site["lon"], Value::Null);
    assert_eq!(site["lat"], Value::Null);
    assert_eq!(site["display"], "finradfast");
}

#[test]
fn test_data_keys_are_not_camelized() {
    let catalog = catalog_of(&[filenames::PPI_FIKAU_0_3_HCLASS]);
    let rendered = render_catalog(&catalog);

    let info = &rendered["fikau"]["products"]["PPI hclass"]["flavors"]["0.3"]["times"][0]
        ["productInfo"];
    assert_eq!(info["dataScale"]["mapping"]["3"], "WET_SNOW");
    assert_eq!(info["dataScale"]["notScanned"], 255);
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_keys_rendered_in_lexicographic_order() {
    let catalog = catalog_of(&filenames::ALL);
    let json = to_json_string(&catalog, false).unwrap();

    let position = |needle: &str| json.find(needle).unwrap();
    assert!(position("\"fikau\"") < position("\"finrad\""));
    assert!(position("\"finrad\"") < position("\"finradfast\""));
    assert!(position("\"finradfast\"") < position("\"fivan\""));
    assert!(position("\"fivan\"") < position("\"fivim\""));
    assert!(position("\"CAPPI dbZh\"") < position("\"ETOP\""));
    assert!(position("\"ETOP\"") < position("\"PPI dbZh\""));
}

#[test]
fn test_times_rendered_ascending() {
    let mut names = ppi_series("fivim", 0.3, 3, 5);
    names.reverse();
    let rendered = render_catalog(&catalog_of(&names));

    let times: Vec<&str> = rendered["fivim"]["products"]["PPI dbZh"]["flavors"]["0.3"]["times"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["time"].as_str().unwrap())
        .collect();
    assert_eq!(
        times,
        vec!["2026-01-24T00:00:00Z", "2026-01-24T00:05:00Z", "2026-01-24T00:10:00Z"]
    );
}

#[test]
fn test_pretty_output_parses_back() {
    let catalog = catalog_of(&filenames::ALL);
    let pretty = to_json_string(&catalog, true).unwrap();
    let parsed: Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(parsed, render_catalog_document(&catalog));
}
