use oasdiff::diff::{compare_documents, DiffError, DiffKind, DiffResult};
use oasdiff::spec::Document;

fn doc(yaml: &str) -> Document {
    serde_yaml::from_str(yaml).expect("test document should parse")
}

fn diff(previous: &str, actual: &str) -> Vec<DiffResult> {
    compare_documents(&doc(previous), &doc(actual)).expect("comparison should succeed")
}

const PET_GET: &str = r#"
paths:
  /pets:
    get:
      parameters:
        - name: limit
          in: query
          required: true
      responses:
        "200":
          content:
            application/json:
              schema: { type: string }
"#;

#[test]
fn identical_documents_yield_no_diffs() {
    assert!(diff(PET_GET, PET_GET).is_empty());
}

#[test]
fn deprecating_a_parameter_is_one_modification() {
    let actual = r#"
paths:
  /pets:
    get:
      parameters:
        - name: limit
          in: query
          required: true
          deprecated: true
      responses:
        "200":
          content:
            application/json:
              schema: { type: string }
"#;
    let diffs = diff(PET_GET, actual);
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].kind, DiffKind::Modified);
    assert_eq!(diffs[0].message.as_deref(), Some("parameter is now deprecated"));
    assert_eq!(diffs[0].context.request.as_deref(), Some("limit"));

    let diffs = diff(actual, PET_GET);
    assert_eq!(diffs.len(), 1);
    assert_eq!(
        diffs[0].message.as_deref(),
        Some("parameter is no more deprecated")
    );
}

#[test]
fn replacing_one_media_type_with_two_yields_three_diffs() {
    let previous = r#"
paths:
  /messages:
    post:
      requestBody:
        content:
          application/json:
            schema: { type: string }
      responses: {}
"#;
    let actual = r#"
paths:
  /messages:
    post:
      requestBody:
        content:
          application/xml:
            schema: { type: string }
          text/xml:
            schema: { type: string }
      responses: {}
"#;
    let diffs = diff(previous, actual);
    assert_eq!(diffs.len(), 3);

    assert_eq!(diffs[0].kind, DiffKind::Removed);
    assert_eq!(
        diffs[0].message.as_deref(),
        Some("'application/json' has been removed")
    );
    assert_eq!(diffs[1].kind, DiffKind::Added);
    assert_eq!(
        diffs[1].message.as_deref(),
        Some("'application/xml' has been added")
    );
    assert_eq!(diffs[2].kind, DiffKind::Added);
    assert_eq!(diffs[2].message.as_deref(), Some("'text/xml' has been added"));

    for d in &diffs {
        let request = d.context.request.as_deref().unwrap_or("");
        assert!(request.starts_with("<Body>."), "context was {request:?}");
    }
}

#[test]
fn adding_a_required_property_name_is_one_addition() {
    let previous = r#"
paths:
  /pets:
    get:
      responses:
        "200":
          content:
            application/json:
              schema:
                type: object
                required: [name]
                properties:
                  name: { type: string }
                  age: { type: integer }
"#;
    let actual = r#"
paths:
  /pets:
    get:
      responses:
        "200":
          content:
            application/json:
              schema:
                type: object
                required: [name, age]
                properties:
                  name: { type: string }
                  age: { type: integer }
"#;
    let diffs = diff(previous, actual);
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].kind, DiffKind::Added);
    assert_eq!(diffs[0].message.as_deref(), Some("'age' has been added"));
}

#[test]
fn adding_and_removing_operations_reports_by_method() {
    let previous = r#"
paths:
  /pets:
    get:
      responses: {}
    delete:
      responses: {}
"#;
    let actual = r#"
paths:
  /pets:
    get:
      responses: {}
    post:
      responses: {}
"#;
    let diffs = diff(previous, actual);
    assert_eq!(diffs.len(), 2);
    // Method order, not alphabetical: POST precedes DELETE.
    assert_eq!(diffs[0].kind, DiffKind::Added);
    assert_eq!(diffs[0].message.as_deref(), Some("'POST' has been added"));
    assert_eq!(diffs[1].kind, DiffKind::Removed);
    assert_eq!(diffs[1].message.as_deref(), Some("'DELETE' has been removed"));
}

#[test]
fn route_level_parameters_on_both_sides_are_refused() {
    let shared = r#"
paths:
  /pets/{id}:
    parameters:
      - name: id
        in: path
        required: true
    get:
      responses: {}
"#;
    let result = compare_documents(&doc(shared), &doc(shared));
    assert_eq!(
        result,
        Err(DiffError::SharedPathParameters {
            route: "/pets/{id}".to_string()
        })
    );
}

#[test]
fn route_level_parameters_on_one_side_only_are_tolerated() {
    let shared = r#"
paths:
  /pets/{id}:
    parameters:
      - name: id
        in: path
        required: true
    get:
      responses: {}
"#;
    let plain = r#"
paths:
  /pets/{id}:
    get:
      responses: {}
"#;
    assert!(diff(shared, plain).is_empty());
    assert!(diff(plain, shared).is_empty());
}

#[test]
fn swapping_inputs_swaps_added_and_removed() {
    let previous = r#"
paths:
  /pets:
    get:
      responses: {}
  /owners:
    get:
      responses: {}
"#;
    let actual = r#"
paths:
  /pets:
    get:
      responses: {}
  /toys:
    get:
      responses: {}
"#;
    let forward = diff(previous, actual);
    let backward = diff(actual, previous);
    assert_eq!(forward.len(), backward.len());

    let added = |diffs: &[DiffResult]| -> Vec<String> {
        diffs
            .iter()
            .filter(|d| d.kind == DiffKind::Added)
            .map(|d| d.context.route.clone())
            .collect()
    };
    let removed = |diffs: &[DiffResult]| -> Vec<String> {
        diffs
            .iter()
            .filter(|d| d.kind == DiffKind::Removed)
            .map(|d| d.context.route.clone())
            .collect()
    };
    assert_eq!(added(&forward), removed(&backward));
    assert_eq!(removed(&forward), added(&backward));
}

#[test]
fn input_ordering_does_not_change_the_report() {
    let one_order = r#"
paths:
  /b:
    get:
      responses: {}
  /a:
    get:
      responses: {}
"#;
    let other_order = r#"
paths:
  /a:
    get:
      responses: {}
  /b:
    get:
      responses: {}
"#;
    let empty = "paths: {}";
    assert_eq!(diff(one_order, empty), diff(other_order, empty));
}

#[test]
fn request_body_presence_and_requiredness() {
    let without = r#"
paths:
  /pets:
    post:
      responses: {}
"#;
    let optional_body = r#"
paths:
  /pets:
    post:
      requestBody:
        content:
          application/json:
            schema: { type: object }
      responses: {}
"#;
    let required_body = r#"
paths:
  /pets:
    post:
      requestBody:
        required: true
        content:
          application/json:
            schema: { type: object }
      responses: {}
"#;
    let diffs = diff(without, optional_body);
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].kind, DiffKind::Added);
    assert_eq!(diffs[0].context.request.as_deref(), Some("<Body>"));
    assert_eq!(diffs[0].message, None);

    let diffs = diff(optional_body, required_body);
    assert_eq!(diffs.len(), 1);
    assert_eq!(
        diffs[0].message.as_deref(),
        Some("request body is now required")
    );
}

#[test]
fn response_header_changes_are_located_under_the_status() {
    let previous = r#"
paths:
  /pets:
    get:
      responses:
        "200":
          headers:
            X-Rate-Limit:
              required: true
"#;
    let actual = r#"
paths:
  /pets:
    get:
      responses:
        "200":
          headers:
            X-Rate-Limit:
              required: false
"#;
    let diffs = diff(previous, actual);
    assert_eq!(diffs.len(), 1);
    assert_eq!(
        diffs[0].message.as_deref(),
        Some("header is no more required")
    );
    assert_eq!(
        diffs[0].context.response.as_deref(),
        Some("200.X-Rate-Limit")
    );
}

#[test]
fn moving_a_parameter_between_locations_is_one_modification() {
    let previous = r#"
paths:
  /pets:
    get:
      parameters:
        - name: token
          in: query
      responses: {}
"#;
    let actual = r#"
paths:
  /pets:
    get:
      parameters:
        - name: token
          in: header
      responses: {}
"#;
    let diffs = diff(previous, actual);
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].kind, DiffKind::Modified);
    assert_eq!(
        diffs[0].message.as_deref(),
        Some("parameter position has changed from Query to Header")
    );
}
