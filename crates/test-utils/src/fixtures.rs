//! Common test fixtures for radar catalog tests.
//!
//! Identifiers here follow the naming conventions actually published by
//! the Finnish radar network.

use radar_common::StaticSiteDirectory;

/// Product file names as listed in the object store.
pub mod filenames {
    pub const PPI_FIKAU_0_3_DBZH: &str = "202601240000_fikau_ppi_0.3_dbzh_qc.tif";
    pub const PPI_FIKAU_0_7_DBZH: &str = "202601240000_fikau_ppi_0.7_dbzh_qc.tif";
    pub const PPI_FIKAU_0_3_HCLASS: &str = "202601240000_fikau_ppi_0.3_hclass_qc.tif";
    pub const PPI_FIKAU_0_3_VRAD: &str = "202601240000_fikau_ppi_0.3_vrad_qc.tif";
    pub const PPI_FIVIM_0_3_DBZH: &str = "202601240000_fivim_ppi_0.3_dbzh_qc.tif";
    pub const CAPPI_FIKAU_600_DBZH: &str = "202601240000_fikau_cappi_600_dbzh_qc.tif";
    pub const CAPPI_FIVAN_600_DBZH: &str = "202601240000_fivan_cappi_600_dbzh_qc.tif";
    pub const ETOP_FIKAU_MINUS_10: &str = "202601240000_fikau_etop_-10_dbzh_qc.tif";
    pub const ETOP_FIKAU_20: &str = "202601240000_fikau_etop_20_dbzh_qc.tif";
    pub const COMPOSITE_CAPPI_600_FINRAD: &str =
        "202601240000_composite_cappi_600_dbzh_finrad_qc.tif";
    pub const COMPOSITE_ACRR_1H: &str =
        "202601240000_composite_cappi_600_acrr1h_finradfast_qc.tif";
    pub const COMPOSITE_ACRR_3H: &str =
        "202601240000_composite_cappi_600_acrr3h_finradfast_qc.tif";

    /// Every well-formed file name above.
    pub const ALL: [&str; 12] = [
        PPI_FIKAU_0_3_DBZH,
        PPI_FIKAU_0_7_DBZH,
        PPI_FIKAU_0_3_HCLASS,
        PPI_FIKAU_0_3_VRAD,
        PPI_FIVIM_0_3_DBZH,
        CAPPI_FIKAU_600_DBZH,
        CAPPI_FIVAN_600_DBZH,
        ETOP_FIKAU_MINUS_10,
        ETOP_FIKAU_20,
        COMPOSITE_CAPPI_600_FINRAD,
        COMPOSITE_ACRR_1H,
        COMPOSITE_ACRR_3H,
    ];

    /// Names that must be rejected by the file-name grammar.
    pub const MALFORMED: [&str; 7] = [
        "202601240000_fikau_rhi_0.3_dbzh_qc.tif",
        "202601240000_fikau_ppi_0.3_zdr_qc.tif",
        "202601240000_fikau_ppi_low_dbzh_qc.tif",
        "20260124_fikau_ppi_0.3_dbzh_qc.tif",
        "202601240000_composite_cappi_600_hclass_finrad_qc.tif",
        "202601240000_composite_cappi_600_dbzh_qc.tif",
        "readme.txt",
    ];
}

/// Object-store keys (`YYYY/MM/DD/{site}/{filename}`).
pub mod object_keys {
    pub const PPI_FIKAU: &str = "2026/01/24/fikau/202601240000_fikau_ppi_0.3_dbzh_qc.tif";
    pub const CAPPI_FIKAU: &str = "2026/01/24/fikau/202601240000_fikau_cappi_600_dbzh_qc.tif";
    pub const COMPOSITE_FINRAD: &str =
        "2026/01/24/finrad/202601240000_composite_cappi_600_dbzh_finrad_qc.tif";
    pub const WRONG_DAY: &str = "2026/01/25/fikau/202601240000_fikau_ppi_0.3_dbzh_qc.tif";
}

/// WMS layer identifiers.
pub mod wms {
    pub const PPI_FIKAU: &str = "LAYERS=Radar%3Afikau_dbzh&TIME=2026-01-24T00%3A05%3A00Z&ELEVATION=0.3";
    pub const ETOP_FIKAU: &str = "LAYERS=fikau_etop_20&TIME=2026-01-24T00:05:00Z";
    pub const RR_FINRAD: &str = "LAYERS=finrad_rr1h&TIME=2026-01-24T00:00:00Z&HEIGHT=600";

    /// A trimmed-down capabilities document with a group layer, two radar
    /// layers, and a layer that is not queryable.
    pub const CAPABILITIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMS_Capabilities version="1.3.0" xmlns="http://www.opengis.net/wms">
  <Service><Name>WMS</Name><Title>Radar</Title></Service>
  <Capability>
    <Layer>
      <Title>Radar products</Title>
      <Layer queryable="1">
        <Name>Radar:fikau_dbzh</Name>
        <Title>Inari reflectivity</Title>
        <Style><Name>default</Name><Title>Default</Title></Style>
        <Dimension name="time" units="ISO8601">2026-01-24T00:00:00Z,2026-01-24T00:05:00Z</Dimension>
        <Dimension name="elevation" units="degrees">0.3,0.7</Dimension>
      </Layer>
      <Layer queryable="1">
        <Name>Radar:finrad_rr1h</Name>
        <Title>Composite 1h accumulation</Title>
        <Dimension name="time" units="ISO8601">2026-01-23T00:00:00Z/2026-01-24T00:00:00Z/PT5M</Dimension>
        <Dimension name="height" units="m">600</Dimension>
      </Layer>
      <Layer queryable="0">
        <Name>Radar:overlay</Name>
        <Dimension name="time" units="ISO8601">2026-01-24T00:00:00Z</Dimension>
      </Layer>
    </Layer>
  </Capability>
</WMS_Capabilities>
"#;
}

/// WFS feature records.
pub mod wfs {
    pub const PPI_FIKAU: &str =
        "radar=fikau&product=ppi&parameter=dbzh&time=2026-01-24T00:10:00Z&elevation=0.3";
    pub const COMPOSITE_ACRR: &str =
        "radar=finradfast&product=composite_cappi&parameter=acrr1h&time=2026-01-24T00:00:00Z&height=600";
}

/// Site directory in the `config/sites.yaml` layout.
pub const SITES_YAML: &str = r#"
sites:
  - { id: fikau, name: Inari, lat: 68.4343, lon: 27.4428 }
  - { id: fivan, name: Vantaa, lat: 60.2706, lon: 24.8690 }
  - { id: fivim, name: Vimpeli, lat: 63.1048, lon: 23.8209 }
  - { id: finrad, name: Finland composite, lat: 64.180708, lon: 25.803222, composite: true }
"#;

/// A directory with Inari, Vantaa, Vimpeli and the national composite.
///
/// `finradfast` is deliberately missing, to exercise unknown-site fallbacks.
pub fn sample_site_directory() -> StaticSiteDirectory {
    StaticSiteDirectory::from_yaml_str(SITES_YAML).expect("fixture site directory is valid")
}
