//! Latest-observation selection.

use std::collections::HashSet;

use catalog::{pending_downloads, select_latest, select_latest_parallel, SelectionKey};
use ingestion::parse_identifier;
use radar_common::{ProductDescriptor, SourceFormat};
use test_utils::{filenames, interleave, ppi_series, wfs};

fn parsed(names: &[impl AsRef<str>]) -> Vec<(String, ProductDescriptor)> {
    names
        .iter()
        .map(|n| {
            let n = n.as_ref();
            (
                n.to_string(),
                parse_identifier(n, SourceFormat::DirectoryScan).unwrap(),
            )
        })
        .collect()
}

fn key(site: &str, product_type: &str, product_subtype: &str) -> SelectionKey {
    SelectionKey {
        site: site.to_string(),
        product_type: product_type.to_string(),
        product_subtype: product_subtype.to_string(),
    }
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_later_observation_wins_in_either_order() {
    let names = ppi_series("fikau", 0.3, 2, 5);
    let t2 = names[1].clone();

    let forward = select_latest(parsed(&names));
    let mut reversed_names = names.clone();
    reversed_names.reverse();
    let reversed = select_latest(parsed(&reversed_names));

    let k = key("fikau", "PPI dbZh", "EL 0.3°");
    assert_eq!(forward.get(&k).unwrap().locator, t2);
    assert_eq!(reversed.get(&k).unwrap().locator, t2);
}

#[test]
fn test_selection_is_idempotent() {
    let items = parsed(&filenames::ALL);
    let once = select_latest(items.clone());

    let mut doubled = items.clone();
    doubled.extend(items);
    let twice = select_latest(doubled);

    assert_eq!(once, twice);
}

#[test]
fn test_older_entries_do_not_displace_winners() {
    let recent = ppi_series("fivan", 0.7, 4, 15);
    let baseline = select_latest(parsed(&recent));

    let mut with_older = parsed(&recent);
    // Same product a day earlier.
    with_older.extend(parsed(&["202601230000_fivan_ppi_0.7_dbzh_qc.tif"]));
    assert_eq!(select_latest(with_older), baseline);
}

#[test]
fn test_one_winner_per_subtype() {
    let selection = select_latest(parsed(&filenames::ALL));

    // Echo-top thresholds and accumulation durations have their own subtypes.
    assert!(selection.get(&key("fikau", "ETOP", "THR -10")).is_some());
    assert!(selection.get(&key("fikau", "ETOP", "THR 20")).is_some());
    assert!(selection.get(&key("finradfast", "ACRR mm", "1h")).is_some());
    assert!(selection.get(&key("finradfast", "ACRR mm", "3h")).is_some());
    assert_eq!(selection.len(), filenames::ALL.len());
}

#[test]
fn test_mixed_grammars_select_newest() {
    let mut items = parsed(&[filenames::PPI_FIKAU_0_3_DBZH]);
    items.push((
        wfs::PPI_FIKAU.to_string(),
        parse_identifier(wfs::PPI_FIKAU, SourceFormat::WfsFeature).unwrap(),
    ));

    let selection = select_latest(items);
    let winner = selection.get(&key("fikau", "PPI dbZh", "EL 0.3°")).unwrap();
    assert_eq!(winner.locator, wfs::PPI_FIKAU);
}

#[test]
fn test_parallel_matches_sequential() {
    let mut names: Vec<String> = filenames::ALL.iter().map(|s| s.to_string()).collect();
    names.extend(ppi_series("fikau", 0.3, 20, 5));
    names.extend(ppi_series("fivim", 0.3, 20, 5));
    names.extend(ppi_series("fikau", 0.7, 20, 5));
    let items = parsed(&interleave(&names));

    assert_eq!(select_latest_parallel(items.clone()), select_latest(items));
}

// ============================================================================
// Pending downloads
// ============================================================================

#[test]
fn test_pending_downloads_skip_existing_sidecars() {
    let selection = select_latest(parsed(&[
        filenames::PPI_FIKAU_0_3_DBZH,
        filenames::CAPPI_FIVAN_600_DBZH,
    ]));

    let present: HashSet<&str> = ["202601240000_fikau_ppi_0.3_dbzh_qc.json"].into();
    let pending = pending_downloads(selection, |name| present.contains(name));

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].locator, filenames::CAPPI_FIVAN_600_DBZH);
}

#[test]
fn test_pending_downloads_nothing_present() {
    let selection = select_latest(parsed(&filenames::ALL));
    let total = selection.len();
    assert_eq!(pending_downloads(selection, |_| false).len(), total);
}
