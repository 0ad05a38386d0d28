//! JSON rendering of a [`Catalog`].
//!
//! ```text
//! { "<site>": { "lon", "lat", "display", "products": { "<product>": {
//!     "display", "flavors": { "<flavor>": { "display", "type",
//!         "times": [ { "time", "url", "productInfo" } ] } } } } } }
//! ```
//!
//! Maps are rendered in key order. Site, product and flavor keys are data and
//! are never camelized; product-info payload keys are.

use radar_common::format_iso8601;
use serde_json::{json, Map, Value};

use crate::error::Result;
use crate::model::{Catalog, Flavor, ProductNode, SiteNode, TimeEntry};

/// Top-level key of the catalog document read by web clients.
pub const DOCUMENT_KEY: &str = "radarProducts";

/// `snake_case` to `camelCase`.
///
/// The first segment is kept as is; later segments get an upper-case first
/// character and lower-case rest.
pub fn camel_case(key: &str) -> String {
    let mut segments = key.split('_');
    let mut out = segments.next().unwrap_or_default().to_string();
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

/// Camelize every object key, recursing through objects and arrays.
pub fn camelize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (camel_case(&k), camelize_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(camelize_keys).collect()),
        scalar => scalar,
    }
}

/// Site map of the catalog.
pub fn render_catalog(catalog: &Catalog) -> Value {
    Value::Object(
        catalog
            .sites()
            .iter()
            .map(|(id, site)| (id.clone(), render_site(site)))
            .collect(),
    )
}

/// The site map wrapped as `{"radarProducts": ...}`.
pub fn render_catalog_document(catalog: &Catalog) -> Value {
    let mut document = Map::new();
    document.insert(DOCUMENT_KEY.to_string(), render_catalog(catalog));
    Value::Object(document)
}

pub fn to_json_string(catalog: &Catalog, pretty: bool) -> Result<String> {
    let document = render_catalog_document(catalog);
    let json = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(json)
}

fn render_site(site: &SiteNode) -> Value {
    let products: Map<String, Value> = site
        .products
        .iter()
        .map(|(id, product)| (id.clone(), render_product(product)))
        .collect();

    json!({
        "lon": site.lon,
        "lat": site.lat,
        "display": site.display,
        "products": products,
    })
}

fn render_product(product: &ProductNode) -> Value {
    let flavors: Map<String, Value> = product
        .flavors
        .iter()
        .map(|(key, flavor)| (key.clone(), render_flavor(flavor)))
        .collect();

    json!({
        "display": product.display,
        "flavors": flavors,
    })
}

fn render_flavor(flavor: &Flavor) -> Value {
    let times: Vec<Value> = flavor.times().iter().map(render_time).collect();
    json!({
        "display": flavor.display,
        "type": flavor.kind,
        "times": times,
    })
}

fn render_time(entry: &TimeEntry) -> Value {
    json!({
        "time": format_iso8601(&entry.time),
        "url": entry.url,
        "productInfo": camelize_keys(entry.product_info.clone()),
    })
}
