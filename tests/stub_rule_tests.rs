//! Wire format tests for complete stub mappings.

use serde_json::json;
use std::time::Duration;
use wiremock_client::matcher::{
    absent, and, contains, equal_to, equal_to_ignore_case, equal_to_json, equal_to_xml,
    matching, not, not_matching, starts_with,
};
use wiremock_client::matching::EqualFlag;
use wiremock_client::{
    get, post, url_matching, url_path_equal_to, url_path_template, MultipartPattern, Request,
    ResponseSpec, StubRule, Webhook, SCENARIO_STATE_STARTED,
};

#[test]
fn test_minimal_stub() {
    let rule = StubRule::new("PATCH", url_matching("/example"));

    assert_eq!(
        rule.to_json().unwrap(),
        format!(
            r#"{{"uuid":"{0}","id":"{0}","request":{{"method":"PATCH","urlPattern":"/example"}},"response":{{"status":200}}}}"#,
            rule.uuid()
        )
    );
}

#[test]
#[allow(deprecated)]
fn test_full_stub() {
    let rule = post(url_path_equal_to("/example"))
        .with_query_param("firstName", equal_to("Jhon"))
        .with_query_param("lastName", not_matching("Black"))
        .with_query_param("nickname", equal_to_ignore_case("jhonBlack"))
        .with_body_pattern(equal_to_json(
            r#"{"meta": "information"}"#,
            &[EqualFlag::IgnoreArrayOrder, EqualFlag::IgnoreExtraElements],
        ))
        .with_body_pattern(contains("information"))
        .with_multipart_pattern(
            MultipartPattern::new()
                .with_name("info")
                .with_header("Content-Type", contains("charset"))
                .with_body_pattern(equal_to_json("{}", &[EqualFlag::IgnoreExtraElements])),
        )
        .with_basic_auth("username", "password")
        .with_header("x-absent", absent())
        .with_cookie("absentcookie", absent())
        .with_header("x-session", matching(r"^\S+@\S+$"))
        .with_cookie("session", equal_to_xml("<xml>"))
        .will_return(
            r#"{"code": 400, "detail": "detail"}"#,
            [("Content-Type", "application/json")],
            400,
        )
        .with_fixed_delay_milliseconds(Duration::from_secs(5))
        .at_priority(1)
        .in_scenario("Scenario")
        .when_scenario_state_is(SCENARIO_STATE_STARTED)
        .will_set_state_to("Stopped");

    let actual: serde_json::Value = serde_json::from_str(&rule.to_json().unwrap()).unwrap();

    assert_eq!(
        actual,
        json!({
            "uuid": rule.uuid(),
            "id": rule.uuid(),
            "priority": 1,
            "scenarioName": "Scenario",
            "requiredScenarioState": "Started",
            "newScenarioState": "Stopped",
            "request": {
                "method": "POST",
                "urlPath": "/example",
                "headers": {
                    "x-absent": {"absent": true},
                    "x-session": {"matches": "^\\S+@\\S+$"}
                },
                "queryParameters": {
                    "firstName": {"equalTo": "Jhon"},
                    "lastName": {"doesNotMatch": "Black"},
                    "nickname": {"equalTo": "jhonBlack", "caseInsensitive": true}
                },
                "cookies": {
                    "absentcookie": {"absent": true},
                    "session": {"equalToXml": "<xml>"}
                },
                "bodyPatterns": [
                    {
                        "equalToJson": "{\"meta\": \"information\"}",
                        "ignoreArrayOrder": true,
                        "ignoreExtraElements": true
                    },
                    {"contains": "information"}
                ],
                "multipartPatterns": [
                    {
                        "matchingType": "ANY",
                        "headers": {
                            "Content-Disposition": {"contains": "name=\"info\""},
                            "Content-Type": {"contains": "charset"}
                        },
                        "bodyPatterns": [
                            {"equalToJson": "{}", "ignoreExtraElements": true}
                        ]
                    }
                ],
                "basicAuthCredentials": {"username": "username", "password": "password"}
            },
            "response": {
                "status": 400,
                "body": "{\"code\": 400, \"detail\": \"detail\"}",
                "headers": {"Content-Type": "application/json"},
                "fixedDelayMilliseconds": 5000
            }
        })
    );
}

#[test]
fn test_serialization_is_stable() {
    let rule = get(url_path_template("/contacts/{contactId}"))
        .with_path_param("contactId", equal_to("12345").or(equal_to("23456")))
        .with_header("Accept", not(and(contains("xml"), [contains("html")])))
        .will_return_response(
            ResponseSpec::new()
                .with_json_body(json!({"id": 12345}))
                .with_log_normal_random_delay(Duration::from_millis(90), 0.1),
        );

    let first = rule.to_json().unwrap();
    assert_eq!(first, rule.to_json().unwrap());
    assert_eq!(first, rule.clone().to_json().unwrap());

    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(
        value["request"]["pathParameters"]["contactId"],
        json!({"or": [{"equalTo": "12345"}, {"equalTo": "23456"}]})
    );
    assert_eq!(
        value["request"]["headers"]["Accept"],
        json!({"not": {"and": [{"contains": "xml"}, {"contains": "html"}]}})
    );
    assert_eq!(
        value["response"]["delayDistribution"],
        json!({"type": "lognormal", "median": 90, "sigma": 0.1})
    );
}

#[test]
fn test_auth_helpers_diverge() {
    let bearer = serde_json::to_value(
        Request::new("GET", url_path_equal_to("/"))
            .with_bearer_token(equal_to("token").or(matching("t.*"))),
    )
    .unwrap();
    assert_eq!(
        bearer["headers"]["Authorization"],
        json!({"and": [
            {"matches": "^Bearer "},
            {"or": [{"equalTo": "Bearer token"}, {"matches": "^Bearer t.*"}]}
        ]})
    );

    let token = serde_json::to_value(
        Request::new("GET", url_path_equal_to("/")).with_auth_token(starts_with("abc")),
    )
    .unwrap();
    assert_eq!(
        token["headers"]["Authorization"],
        json!({"hasExactly": [{"matches": "^Token "}, {"matches": "^Token abc"}]})
    );
}

#[test]
fn test_post_serve_webhook() {
    let rule = post(url_path_equal_to("/order")).with_post_serve_action(
        "webhook",
        Webhook::new()
            .with_method("POST")
            .with_url("http://callback.local/notify")
            .with_body("done"),
    );

    let value: serde_json::Value = serde_json::from_str(&rule.to_json().unwrap()).unwrap();
    assert_eq!(
        value["postServeActions"],
        json!([{
            "name": "webhook",
            "parameters": {
                "method": "POST",
                "url": "http://callback.local/notify",
                "body": "done"
            }
        }])
    );
}
