//! Salesforce-backed record source.
//!
//! Every fetch performs two calls, without caching a session:
//! - POST {login}/services/Soap/u/{ver}  — SOAP partner `login` (username + password + token)
//! - GET  {instance}/services/data/v{ver}/query?q=SOQL — REST query with the session id
//!
//! Failures of either call are logged and returned as
//! [`FetchOutcome::Unavailable`]; the caller decides whether to degrade.
//! A row without `Name`, `Industry` or `Phone` is [`FetchOutcome::Invalid`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use tracing::{debug, info, warn};

use crate::{
    config::SalesforceConfig,
    error::CrmError,
    record::AccountRecord,
    source::{FetchOutcome, RecordSource},
};

const SNIPPET_MAX_CHARS: usize = 300;

/// Live Salesforce account query.
#[derive(Debug)]
pub struct SalesforceSource {
    client: reqwest::Client,
    cfg: SalesforceConfig,
    login_url: String,
}

/// Authenticated session returned by the SOAP login.
#[derive(Debug)]
struct Session {
    session_id: String,
    instance_url: String,
}

impl SalesforceSource {
    /// Creates a source from explicit config. Does not contact Salesforce.
    ///
    /// # Errors
    /// [`CrmError::HttpTransport`] if the HTTP client cannot be built.
    pub fn new(cfg: SalesforceConfig) -> Result<Self, CrmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;
        let login_url = cfg.login_endpoint();

        if cfg.username.is_none() || cfg.password.is_none() {
            warn!("Salesforce credentials are not set; every fetch will come back unavailable");
        }

        info!(
            login_url = %login_url,
            api_version = %cfg.api_version,
            timeout_secs = ?cfg.timeout_secs,
            "SalesforceSource initialized"
        );

        Ok(Self {
            client,
            cfg,
            login_url,
        })
    }

    async fn try_fetch(&self, limit: usize) -> Result<Vec<AccountRecord>, CrmError> {
        let username = self
            .cfg
            .username
            .as_deref()
            .ok_or(CrmError::MissingCredentials("SALESFORCE_USERNAME"))?;
        let password = self
            .cfg
            .password
            .as_deref()
            .ok_or(CrmError::MissingCredentials("SALESFORCE_PASSWORD"))?;

        let session = self.login(username, password).await?;
        let mut records = self.query_accounts(&session, limit).await?;
        records.truncate(limit);
        Ok(records)
    }

    async fn login(&self, username: &str, password: &str) -> Result<Session, CrmError> {
        let started = Instant::now();
        let envelope = login_envelope(username, &format!("{password}{}", self.cfg.security_token));

        debug!(url = %self.login_url, "POST Salesforce SOAP login");

        let resp = self
            .client
            .post(&self.login_url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml; charset=UTF-8")
            .header("SOAPAction", "login")
            .body(envelope)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let fault = extract_tag(&body, "faultstring").unwrap_or_else(|| make_snippet(&body));
            return Err(CrmError::LoginFailed { status, fault });
        }

        let session_id = extract_tag(&body, "sessionId")
            .ok_or_else(|| CrmError::Decode("login response has no `sessionId`".into()))?;
        let server_url = extract_tag(&body, "serverUrl")
            .ok_or_else(|| CrmError::Decode("login response has no `serverUrl`".into()))?;

        debug!(
            latency_ms = started.elapsed().as_millis(),
            "Salesforce login succeeded"
        );

        Ok(Session {
            session_id,
            instance_url: instance_url(&server_url),
        })
    }

    async fn query_accounts(
        &self,
        session: &Session,
        limit: usize,
    ) -> Result<Vec<AccountRecord>, CrmError> {
        let started = Instant::now();
        let soql = account_soql(limit);
        let url = format!(
            "{}/services/data/v{}/query",
            session.instance_url, self.cfg.api_version
        );

        debug!(%url, %soql, "GET Salesforce query");

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&session.session_id)
            .query(&[("q", soql.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(CrmError::QueryFailed {
                status,
                snippet: make_snippet(&text),
            });
        }

        let bytes = resp.bytes().await?;
        let out: QueryResponse =
            serde_json::from_slice(&bytes).map_err(|e| CrmError::Decode(e.to_string()))?;

        info!(
            records = out.records.len(),
            latency_ms = started.elapsed().as_millis(),
            "Salesforce query completed"
        );

        out.records
            .into_iter()
            .map(|row| {
                serde_json::from_value::<SfAccount>(row)
                    .map(AccountRecord::from)
                    .map_err(|e| CrmError::InvalidRecord(e.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl RecordSource for SalesforceSource {
    fn name(&self) -> &'static str {
        "salesforce"
    }

    async fn fetch(&self, limit: usize) -> FetchOutcome {
        match self.try_fetch(limit).await {
            Ok(records) => FetchOutcome::Records(records),
            Err(err @ CrmError::InvalidRecord(_)) => {
                warn!(error = %err, limit, "Salesforce returned an invalid account record");
                FetchOutcome::Invalid(err)
            }
            Err(err) => {
                warn!(error = %err, limit, "Salesforce fetch failed");
                FetchOutcome::Unavailable(err)
            }
        }
    }
}

/* ===========================================================================
Payloads & helpers
======================================================================== */

/// Rows stay untyped here so a bad row is told apart from a bad body.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    records: Vec<serde_json::Value>,
}

/// Raw `Account` row. Keys are required; `null` values decode as "".
#[derive(Debug, Deserialize)]
struct SfAccount {
    #[serde(rename = "Name", deserialize_with = "nullable_text")]
    name: String,
    #[serde(rename = "Industry", deserialize_with = "nullable_text")]
    industry: String,
    #[serde(rename = "Phone", deserialize_with = "nullable_text")]
    phone: String,
}

impl From<SfAccount> for AccountRecord {
    fn from(a: SfAccount) -> Self {
        AccountRecord {
            name: a.name,
            industry: a.industry,
            phone: a.phone,
        }
    }
}

fn nullable_text<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn account_soql(limit: usize) -> String {
    format!("SELECT Name, Industry, Phone FROM Account LIMIT {limit}")
}

fn login_envelope(username: &str, password: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<env:Envelope xmlns:xsd="http://www.w3.org/2001/XMLSchema"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
  <env:Body>
    <n1:login xmlns:n1="urn:partner.soap.sforce.com">
      <n1:username>{}</n1:username>
      <n1:password>{}</n1:password>
    </n1:login>
  </env:Body>
</env:Envelope>"#,
        xml_escape(username),
        xml_escape(password)
    )
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn xml_unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Text of the first `<tag>...</tag>` element (unprefixed tag names only).
fn extract_tag(xml: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = xml.find(&open)? + open.len();
    let end = start + xml[start..].find(&close)?;
    Some(xml_unescape(xml[start..end].trim()))
}

/// Scheme + host of the SOAP `serverUrl`.
fn instance_url(server_url: &str) -> String {
    match server_url.find("/services/") {
        Some(idx) => server_url[..idx].to_string(),
        None => server_url.trim_end_matches('/').to_string(),
    }
}

/// Collapses whitespace and cuts at [`SNIPPET_MAX_CHARS`], marking the cut with `…`.
fn make_snippet(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= SNIPPET_MAX_CHARS {
        collapsed
    } else {
        let cut: String = collapsed.chars().take(SNIPPET_MAX_CHARS).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LOGIN_PATH: &str = "/services/Soap/u/59.0";
    const QUERY_PATH: &str = "/services/data/v59.0/query";

    fn cfg(server: &MockServer) -> SalesforceConfig {
        SalesforceConfig {
            username: Some("ops@acme.com".into()),
            password: Some("hunter2".into()),
            security_token: "TOKEN".into(),
            domain: "login".into(),
            login_url: Some(server.uri()),
            api_version: "59.0".into(),
            timeout_secs: Some(5),
        }
    }

    fn login_ok(server: &MockServer) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns="urn:partner.soap.sforce.com">
<soapenv:Body><loginResponse><result>
<metadataServerUrl>{uri}/services/Soap/m/59.0/00D000000000001</metadataServerUrl>
<passwordExpired>false</passwordExpired>
<serverUrl>{uri}/services/Soap/u/59.0/00D000000000001</serverUrl>
<sessionId>00D!SESSION</sessionId>
</result></loginResponse></soapenv:Body></soapenv:Envelope>"#,
            uri = server.uri()
        )
    }

    async fn mount_login(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .and(header("SOAPAction", "login"))
            .and(body_string_contains("<n1:username>ops@acme.com</n1:username>"))
            .and(body_string_contains("<n1:password>hunter2TOKEN</n1:password>"))
            .respond_with(ResponseTemplate::new(200).set_body_string(login_ok(server)))
            .mount(server)
            .await;
    }

    fn account(name: &str, industry: serde_json::Value, phone: serde_json::Value) -> serde_json::Value {
        json!({
            "attributes": { "type": "Account", "url": "/services/data/v59.0/sobjects/Account/001" },
            "Name": name,
            "Industry": industry,
            "Phone": phone
        })
    }

    #[tokio::test]
    async fn logs_in_then_queries_accounts() {
        let server = MockServer::start().await;
        mount_login(&server).await;

        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .and(query_param("q", "SELECT Name, Industry, Phone FROM Account LIMIT 3"))
            .and(header("authorization", "Bearer 00D!SESSION"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": 2,
                "done": true,
                "records": [
                    account("Acme Corp", json!("Energy"), json!("+1-555-0100")),
                    account("Globex", json!(null), json!("+1-555-0200")),
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let src = SalesforceSource::new(cfg(&server)).unwrap();
        let records = src.fetch(3).await.into_result().unwrap();

        assert_eq!(
            records,
            vec![
                AccountRecord::new("Acme Corp", "Energy", "+1-555-0100"),
                AccountRecord::new("Globex", "", "+1-555-0200"),
            ]
        );
    }

    #[tokio::test]
    async fn never_returns_more_than_limit() {
        let server = MockServer::start().await;
        mount_login(&server).await;

        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": 3,
                "done": true,
                "records": [
                    account("A", json!("x"), json!("1")),
                    account("B", json!("y"), json!("2")),
                    account("C", json!("z"), json!("3")),
                ]
            })))
            .mount(&server)
            .await;

        let src = SalesforceSource::new(cfg(&server)).unwrap();
        assert_eq!(src.fetch(2).await.into_result().unwrap().len(), 2);
        assert!(src.fetch(0).await.into_result().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_credentials_are_unavailable_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let src = SalesforceSource::new(SalesforceConfig {
            username: None,
            ..cfg(&server)
        })
        .unwrap();

        let outcome = src.fetch(3).await;
        assert!(matches!(
            outcome,
            FetchOutcome::Unavailable(CrmError::MissingCredentials("SALESFORCE_USERNAME"))
        ));
    }

    #[tokio::test]
    async fn login_fault_is_unavailable_with_faultstring() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string(
                r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"><soapenv:Body><soapenv:Fault><faultcode>INVALID_LOGIN</faultcode><faultstring>INVALID_LOGIN: Invalid username, password, security token; or user locked out.</faultstring></soapenv:Fault></soapenv:Body></soapenv:Envelope>"#,
            ))
            .mount(&server)
            .await;

        let src = SalesforceSource::new(cfg(&server)).unwrap();
        match src.fetch(3).await {
            FetchOutcome::Unavailable(CrmError::LoginFailed { status, fault }) => {
                assert_eq!(status.as_u16(), 500);
                assert!(fault.starts_with("INVALID_LOGIN"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_unavailable() {
        // Nothing listens on the discard port.
        let src = SalesforceSource::new(SalesforceConfig {
            username: Some("ops@acme.com".into()),
            password: Some("hunter2".into()),
            security_token: String::new(),
            domain: "login".into(),
            login_url: Some("http://127.0.0.1:9".into()),
            api_version: "59.0".into(),
            timeout_secs: Some(2),
        })
        .unwrap();

        assert!(src.fetch(3).await.is_unavailable());
    }

    #[tokio::test]
    async fn record_missing_a_field_is_invalid_not_unavailable() {
        let server = MockServer::start().await;
        mount_login(&server).await;

        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": 1,
                "done": true,
                "records": [ { "Name": "Acme Corp", "Phone": "+1-555-0100" } ]
            })))
            .mount(&server)
            .await;

        let src = SalesforceSource::new(cfg(&server)).unwrap();
        match src.fetch(3).await {
            FetchOutcome::Invalid(CrmError::InvalidRecord(msg)) => assert!(msg.contains("Industry")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_query_body_is_unavailable() {
        let server = MockServer::start().await;
        mount_login(&server).await;

        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let src = SalesforceSource::new(cfg(&server)).unwrap();
        assert!(matches!(
            src.fetch(3).await,
            FetchOutcome::Unavailable(CrmError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn query_failure_snippet_marks_truncation() {
        let server = MockServer::start().await;
        mount_login(&server).await;

        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy ".repeat(200)))
            .mount(&server)
            .await;

        let src = SalesforceSource::new(cfg(&server)).unwrap();
        match src.fetch(3).await {
            FetchOutcome::Unavailable(CrmError::QueryFailed { status, snippet }) => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(snippet.chars().count(), SNIPPET_MAX_CHARS + 1);
                assert!(snippet.ends_with('…'));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn snippet_is_kept_whole_when_short() {
        assert_eq!(make_snippet("  INVALID_SESSION_ID \n  expired "), "INVALID_SESSION_ID expired");
    }

    #[test]
    fn xml_helpers() {
        assert_eq!(xml_escape("a&b<c>"), "a&amp;b&lt;c&gt;");
        assert_eq!(
            extract_tag("<r><sessionId> abc&amp;d </sessionId></r>", "sessionId").as_deref(),
            Some("abc&d")
        );
        assert_eq!(extract_tag("<r></r>", "sessionId"), None);
        assert_eq!(
            instance_url("https://acme.my.salesforce.com/services/Soap/u/59.0/00D"),
            "https://acme.my.salesforce.com"
        );
    }

    #[test]
    fn login_envelope_escapes_credentials() {
        let xml = login_envelope("a<b@x.com", "p&ss");
        assert!(xml.contains("<n1:username>a&lt;b@x.com</n1:username>"));
        assert!(xml.contains("<n1:password>p&amp;ss</n1:password>"));
    }
}
