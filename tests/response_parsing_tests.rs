//! Integration tests for response parsing.
//!
//! These tests run full XML documents through conversion, flattening and
//! envelope parsing, the way the client does after a call.

use ebay_api::parse::{parse_items_from_response, xml_to_json};
use ebay_api::{
    flatten, parse_envelope, AppId, ArrayFieldPolicy, Classification, Depth, EbayConfig,
    EbayError, RequestContext, ResponseParser, ScalarCoercion, ServiceName, SeverityCode,
};
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};

const GET_ORDERS: &str = include_str!("fixtures/GetOrders.xml");

fn get_orders_context() -> RequestContext {
    RequestContext::new(ServiceName::Trading, "GetOrders").unwrap()
}

fn parse_get_orders(context: &RequestContext) -> Value {
    let tree = assert_ok!(xml_to_json(GET_ORDERS));
    assert_ok!(parse_envelope(tree, context))
}

// ============================================================================
// GetOrders
// ============================================================================

#[test]
fn test_get_orders_unwraps_order_array() {
    let data = parse_get_orders(&get_orders_context());

    assert_eq!(data["Ack"], "Success");
    assert!(data.get("OrderArray").is_none());

    let orders = data["Orders"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["OrderID"], "110176343542-27946281001");
    assert_eq!(orders[1]["OrderStatus"], "Active");
}

#[test]
fn test_get_orders_keeps_known_arrays() {
    let data = parse_get_orders(&get_orders_context());
    let first = &data["Orders"][0];

    let transactions = first["Transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 1);

    let tax_details = transactions[0]["Taxes"]["TaxDetails"].as_array().unwrap();
    assert_eq!(tax_details.len(), 1);
    assert_eq!(tax_details[0]["Imposition"], "SalesTax");

    assert!(first["ExternalTransaction"].is_array());
    assert!(first["ShippingDetails"]["ShippingServiceOptions"].is_array());

    let second = &data["Orders"][1];
    assert_eq!(second["Transactions"].as_array().unwrap().len(), 2);
    assert_eq!(
        second["Transactions"][0]["Taxes"]["TaxDetails"]
            .as_array()
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn test_get_orders_scalars_and_amounts() {
    let data = parse_get_orders(&get_orders_context());
    let order = &data["Orders"][0];

    assert_eq!(data["PaginationResult"]["TotalNumberOfPages"], 1);
    assert_eq!(data["HasMoreOrders"], false);
    assert_eq!(data["Timestamp"], "2015-10-11T15:01:00.222Z");

    assert_eq!(order["IsMultiLegShipping"], false);
    assert_eq!(order["AdjustmentAmount"], json!({"amount": 0, "currencyID": "USD"}));
    assert_eq!(order["AmountPaid"]["amount"], 6);
    assert_eq!(order["Transactions"][0]["TransactionPrice"]["amount"], 3);
    assert_eq!(order["Transactions"][0]["QuantityPurchased"], 2);
    assert_eq!(
        order["ExternalTransaction"][0]["FeeOrCreditAmount"],
        json!({"amount": 0.47, "currencyID": "USD"})
    );
    assert_eq!(data["Orders"][1]["AmountPaid"]["amount"], 10.5);
}

#[test]
fn test_get_orders_with_exempt_id_fields() {
    let config = EbayConfig::builder()
        .app_id(AppId::new("app").unwrap())
        .scalar_coercion(ScalarCoercion::default().with_exempt_field("ItemID"))
        .build()
        .unwrap();
    let parser = ResponseParser::from_config(&config);

    let tree = assert_ok!(xml_to_json(GET_ORDERS));
    let data = assert_ok!(parser.parse_envelope(tree, &get_orders_context()));
    let transaction = &data["Orders"][0]["Transactions"][0];

    assert_eq!(transaction["Item"]["ItemID"], "110176343542");
    assert_eq!(transaction["TransactionID"], 27_946_281_001_u64);
}

#[test]
fn test_get_orders_with_limited_depth() {
    let context = get_orders_context().with_parse_depth(Depth::Limited(1));
    let data = parse_get_orders(&context);

    assert_eq!(data["Ack"], "Success");
    assert_eq!(data["Timestamp"], json!(["2015-10-11T15:01:00.222Z"]));
    assert_eq!(
        data["PaginationResult"],
        json!([{"TotalNumberOfPages": ["1"], "TotalNumberOfEntries": ["2"]}])
    );
}

#[test]
fn test_policy_for_other_operation_does_not_apply() {
    let context = RequestContext::new(ServiceName::Trading, "GetSellerTransactions").unwrap();
    let tree = json!({"GetSellerTransactionsResponse": {
        "Ack": ["Success"],
        "TaxDetails": [{"Imposition": ["SalesTax"]}]
    }});

    let data = assert_ok!(parse_envelope(tree, &context));
    assert_eq!(data["TaxDetails"], json!({"Imposition": "SalesTax"}));
}

// ============================================================================
// Failures
// ============================================================================

const FAILURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<GetOrdersResponse xmlns="urn:ebay:apis:eBLBaseComponents">
  <Timestamp>2015-10-11T15:01:00.222Z</Timestamp>
  <Ack>Failure</Ack>
  <Errors>
    <ShortMessage>x</ShortMessage>
    <LongMessage>Something really went wrong.</LongMessage>
    <ErrorCode>12345</ErrorCode>
    <SeverityCode>Error</SeverityCode>
    <ErrorClassification>RequestError</ErrorClassification>
  </Errors>
</GetOrdersResponse>"#;

#[test]
fn test_failure_is_request_error() {
    let tree = assert_ok!(xml_to_json(FAILURE));
    let error = assert_err!(parse_envelope(tree, &get_orders_context()));

    assert!(error.is_request_error());
    let details = error.response_error().unwrap();
    assert!(details.message.contains("Something really went wrong."));
    assert!(details.message.contains("12345"));
    assert_eq!(details.severity_code, SeverityCode::Error);
    assert_eq!(details.classification, Classification::RequestError);
    assert_eq!(details.details, json!("Failure"));
    assert_eq!(details.context.op_type(), "GetOrders");
    assert_eq!(details.errors.len(), 1);
}

#[test]
fn test_warning_is_error_with_data() {
    let xml = FAILURE
        .replace("<Ack>Failure</Ack>", "<Ack>Warning</Ack>")
        .replace(
            "<SeverityCode>Error</SeverityCode>",
            "<SeverityCode>Warning</SeverityCode>",
        )
        .replace(
            "</Errors>",
            "</Errors>\n  <OrderArray><Order><OrderID>1-2</OrderID></Order></OrderArray>",
        );

    let tree = assert_ok!(xml_to_json(&xml));
    let error = assert_err!(parse_envelope(tree, &get_orders_context()));

    let details = error.response_error().unwrap();
    assert_eq!(details.severity_code, SeverityCode::Warning);
    assert_eq!(details.details, json!("Warning"));

    let data = error.data().unwrap();
    assert_eq!(data["Orders"], json!([{"OrderID": "1-2"}]));
    assert_eq!(data["Timestamp"], "2015-10-11T15:01:00.222Z");
}

#[test]
fn test_system_error_classification() {
    let xml = FAILURE.replace(
        "<ErrorClassification>RequestError</ErrorClassification>",
        "<ErrorClassification>SystemError</ErrorClassification>",
    );

    let tree = assert_ok!(xml_to_json(&xml));
    let error = assert_err!(parse_envelope(tree, &get_orders_context()));

    assert!(error.is_system_error());
    assert!(matches!(error, EbayError::System(_)));
}

#[test]
fn test_missing_envelope_is_client_error() {
    let tree = assert_ok!(xml_to_json("<Something><Ack>Success</Ack></Something>"));
    let error = assert_err!(parse_envelope(tree, &get_orders_context()));

    assert!(error.is_client_error());
    assert!(error.to_string().contains("GetOrdersResponse"));
    assert_eq!(error.data(), Some(&json!({"Something": {"Ack": "Success"}})));
}

// ============================================================================
// Flattening and items
// ============================================================================

#[test]
fn test_flatten_is_idempotent_without_wrapped_arrays() {
    let tree = json!({"a": [{"b": ["1"], "c": [{"d": ["x"]}]}], "e": ["true"]});
    let once = flatten(tree, Depth::Unlimited, None);
    let twice = flatten(once.clone(), Depth::Unlimited, None);

    assert_eq!(once, json!({"a": {"b": 1, "c": {"d": "x"}}, "e": true}));
    assert_eq!(once, twice);
}

#[test]
fn test_custom_policy_protects_single_item() {
    let policy = ArrayFieldPolicy::new().with_fields("Shopping", "GetSingleItem", ["PictureURL"]);
    let parser = ResponseParser::new(policy, ScalarCoercion::default());
    let context = RequestContext::new(ServiceName::Shopping, "GetSingleItem").unwrap();

    let tree = json!({"GetSingleItemResponse": {
        "Ack": "Success",
        "Item": {"PictureURL": "http://example.com/1.jpg"}
    }});
    let data = assert_ok!(parser.parse_envelope(tree, &context));

    assert_eq!(data["Item"]["PictureURL"], json!(["http://example.com/1.jpg"]));
}

#[test]
fn test_items_from_shopping_response() {
    let context = RequestContext::new(ServiceName::Shopping, "GetSingleItem").unwrap();
    let tree = assert_ok!(xml_to_json(
        "<GetSingleItemResponse><Ack>Success</Ack>\
         <Item><ItemID>42</ItemID><Title>Lamp</Title>\
         <CurrentPrice currencyID=\"USD\">12.99</CurrentPrice></Item>\
         </GetSingleItemResponse>"
    ));
    let data = assert_ok!(parse_envelope(tree, &context));

    let items = parse_items_from_response(&data);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["Title"], "Lamp");
    assert_eq!(
        items[0]["CurrentPrice"],
        json!({"amount": 12.99, "currencyID": "USD"})
    );
}
