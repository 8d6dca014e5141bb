//! Machine-readable API description served at `/swagger.json`
use serde_json::{Value, json};
use url::Url;

use crate::config::ServerConfig;
use crate::datamodel::core::ALLOWED_GEOMETRY_TYPES;

pub const API_TITLE: &str = "Waterverse FAIRness Evaluator";
pub const API_VERSION: &str = "1.0";

/// Swagger 2.0 document describing the two validation routes.
pub fn api_description(config: &ServerConfig) -> Value {
    let mut doc = json!({
        "swagger": "2.0",
        "info": {
            "title": API_TITLE,
            "description": "API for validating a data model according to WATERVERSE FAIR guidelines.",
            "version": API_VERSION,
        },
        "paths": {
            "/upload": {
                "post": {
                    "summary": "File Upload API",
                    "consumes": ["multipart/form-data"],
                    "parameters": [{
                        "in": "formData",
                        "name": "file",
                        "type": "file",
                        "description": "The JSON file to upload.",
                        "required": true,
                    }],
                    "responses": responses("Failed to validate the JSON or incorrect file format."),
                }
            },
            "/api/validate": {
                "post": {
                    "summary": "JSON Validation API",
                    "consumes": ["application/json"],
                    "parameters": [{
                        "in": "body",
                        "name": "body",
                        "required": true,
                        "schema": data_model_schema(),
                    }],
                    "responses": responses("Failed to validate the JSON or incorrect format."),
                }
            },
        },
    });

    if let Ok(url) = Url::parse(&config.base_url())
        && let Some(host) = url.host_str()
    {
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        doc["host"] = json!(host);
        doc["schemes"] = json!([url.scheme()]);
        doc["basePath"] = json!(url.path());
    }
    doc
}

fn responses(failure: &str) -> Value {
    json!({
        "200": { "description": "Successfully validated the data model." },
        "400": { "description": failure },
        "413": { "description": "Payload exceeds the configured size limit." },
    })
}

fn data_model_schema() -> Value {
    json!({
        "type": "object",
        "required": ["location", "@context"],
        "properties": {
            "location": {
                "type": "object",
                "description": "Location object in GeoJSON format",
                "properties": {
                    "type": {
                        "type": "string",
                        "enum": ALLOWED_GEOMETRY_TYPES,
                        "description": "Type of GeoJSON object (Point, LineString, Polygon)",
                    },
                    "coordinates": {
                        "type": "array",
                        "items": {},
                        "description": "Array of coordinates in [longitude, latitude] format",
                    },
                },
            },
            "@context": {
                "type": "array",
                "items": { "type": "string" },
                "description": "NGSI-LD context URLs; the first must point to the Smart Data Models repository",
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn describes_both_routes() {
        let doc = api_description(&ServerConfig::default());
        assert_eq!(doc["info"]["title"], API_TITLE);
        assert_eq!(doc["info"]["version"], "1.0");
        assert!(doc["paths"]["/upload"]["post"].is_object());
        assert_eq!(
            doc["paths"]["/api/validate"]["post"]["parameters"][0]["schema"]["properties"]["location"]
                ["properties"]["type"]["enum"],
            json!(["Point", "Polygon", "LineString"])
        );
    }

    #[test]
    fn host_comes_from_config() {
        let doc = api_description(&ServerConfig::default());
        assert_eq!(doc["host"], "127.0.0.1:5000");
        assert_eq!(doc["schemes"], json!(["http"]));

        let config = ServerConfig {
            public_url: Some(Url::parse("https://fair.example.org/evaluator").unwrap()),
            ..ServerConfig::default()
        };
        let doc = api_description(&config);
        assert_eq!(doc["host"], "fair.example.org");
        assert_eq!(doc["basePath"], "/evaluator");
    }
}
