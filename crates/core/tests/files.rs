//! Loading documents from disk and writing the generated tree.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;

use modgen_core::{
    GeneratorConfig, GeneratorError, WriteSummary, generate_from_path, load_spec, write_files,
};

const YAML: &str = r##"
paths:
  /api/widgets/{id}/:
    get:
      operationId: widgets_read
      parameters:
        - { name: id, in: path, required: true, schema: { type: integer } }
      responses:
        "200":
          content:
            application/json:
              schema: { $ref: "#/components/schemas/Widget" }
components:
  schemas:
    Widget:
      type: object
      properties:
        title: { type: string }
"##;

const JSON: &str = r##"{
  "paths": {
    "/api/widgets/{id}/": {
      "get": {
        "operationId": "widgets_read",
        "parameters": [
          { "name": "id", "in": "path", "required": true, "schema": { "type": "integer" } }
        ],
        "responses": {
          "200": {
            "content": {
              "application/json": { "schema": { "$ref": "#/components/schemas/Widget" } }
            }
          }
        }
      }
    }
  },
  "components": {
    "schemas": {
      "Widget": { "type": "object", "properties": { "title": { "type": "string" } } }
    }
  }
}"##;

#[test]
fn test_yaml_and_json_documents_generate_the_same_tree() {
    let dir = tempfile::tempdir().unwrap();
    let yaml_path = dir.path().join("api.yml");
    let json_path = dir.path().join("api.json");
    fs::write(&yaml_path, YAML).unwrap();
    fs::write(&json_path, JSON).unwrap();

    let config = GeneratorConfig::default();
    let from_yaml = generate_from_path(&yaml_path, &config).unwrap();
    let from_json = generate_from_path(&json_path, &config).unwrap();
    assert_eq!(from_yaml, from_json);

    let contract = &from_yaml["widgets/domains/IWidgetsService.ts"];
    assert!(contract.contains("  get(id: number): Promise<ApiResponse<Widget>>;\n"));
}

#[test]
fn test_parser_errors_propagate() {
    let dir = tempfile::tempdir().unwrap();
    let yaml_path = dir.path().join("broken.yaml");
    let json_path = dir.path().join("broken.json");
    fs::write(&yaml_path, "paths: [unclosed").unwrap();
    fs::write(&json_path, "{ \"paths\": ").unwrap();

    assert!(matches!(load_spec(&yaml_path), Err(GeneratorError::Yaml(_))));
    assert!(matches!(load_spec(&json_path), Err(GeneratorError::Json(_))));
    assert!(matches!(
        load_spec(&dir.path().join("missing.yaml")),
        Err(GeneratorError::Io { .. })
    ));
}

#[test]
fn test_second_write_of_same_spec_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let spec_path = dir.path().join("api.yaml");
    fs::write(&spec_path, YAML).unwrap();
    let out = dir.path().join("modules");

    let config = GeneratorConfig::default();
    let files = generate_from_path(&spec_path, &config).unwrap();
    let first = write_files(&out, &files).unwrap();
    assert_eq!(first.written, files.len());

    let snapshot = fs::read_to_string(out.join("widgets/Widgets.service.ts")).unwrap();
    let again = generate_from_path(&spec_path, &config).unwrap();
    let second = write_files(&out, &again).unwrap();
    assert_eq!(
        second,
        WriteSummary {
            written: 0,
            unchanged: files.len()
        }
    );
    assert_eq!(
        fs::read_to_string(out.join("widgets/Widgets.service.ts")).unwrap(),
        snapshot
    );
}

#[test]
fn test_config_file_overrides_collaborators() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("modgen.toml");
    fs::write(
        &config_path,
        "http_module = \"@/lib/api\"\nhttp_client = \"api\"\nunresolved_refs = \"name\"\n",
    )
    .unwrap();
    let config = GeneratorConfig::from_file(&config_path).unwrap();
    assert_eq!(config.http_client, "api");
    assert_eq!(config.api_prefix, "api");

    let spec_path = dir.path().join("api.yaml");
    fs::write(&spec_path, YAML).unwrap();
    let files = generate_from_path(&spec_path, &config).unwrap();
    let service = &files["widgets/Widgets.service.ts"];
    assert!(service.contains("import { api } from '@/lib/api';\n"));
    assert!(service.contains("    get: (id) => api.get(ENDPOINTS.Widgets.WIDGETS_READ(id)),\n"));
}

#[test]
fn test_invalid_config_is_reported_with_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("modgen.toml");
    fs::write(&config_path, "pagination_params = 3\n").unwrap();
    let err = GeneratorConfig::from_file(&config_path).unwrap_err();
    assert!(matches!(err, GeneratorError::Config { ref path, .. } if path == &config_path));
}
