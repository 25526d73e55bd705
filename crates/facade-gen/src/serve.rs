//! Line protocol over stdin/stdout: one JSON request per line, one JSON
//! response per line.

use std::io::{BufRead, Write};

use facade_synth::{marker_file, render_file, synthesize};
use facade_types::{Query, QueryData, QueryResult, Request, Response};

/// Answer one query. Shutdown is acknowledged here and acted on by the loop.
pub fn handle_query(query: Query) -> QueryResult {
    match query {
        Query::Synthesize { descriptor } => match synthesize(&descriptor) {
            Ok(result) => {
                let file = render_file(&result);
                QueryResult::Success {
                    data: QueryData::Generated { result, file },
                }
            }
            Err(err) => QueryResult::Error {
                message: err.to_string(),
            },
        },
        Query::Marker { namespace } => match marker_file(namespace.as_deref()) {
            Ok(file) => QueryResult::Success {
                data: QueryData::Marker { file },
            },
            Err(err) => QueryResult::Error {
                message: err.to_string(),
            },
        },
        Query::Ping => QueryResult::Success {
            data: QueryData::Pong,
        },
        Query::Shutdown => QueryResult::Success {
            data: QueryData::ShuttingDown,
        },
    }
}

fn send(writer: &mut impl Write, response: &Response) -> anyhow::Result<()> {
    writeln!(writer, "{}", serde_json::to_string(response)?)?;
    writer.flush()?;
    Ok(())
}

fn malformed(message: String) -> Response {
    log::warn!("{}", message);
    Response {
        id: 0,
        result: QueryResult::Error { message },
    }
}

/// Serve requests until shutdown or end of input.
pub fn serve(mut reader: impl BufRead, mut writer: impl Write) -> anyhow::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let line = match String::from_utf8(std::mem::take(&mut buf)) {
            Ok(line) => line,
            Err(e) => {
                send(&mut writer, &malformed(format!("Request is not valid UTF-8: {}", e)))?;
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let request: Request = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                send(&mut writer, &malformed(format!("Failed to parse request: {}", e)))?;
                continue;
            }
        };

        log::debug!("Request {}", request.id);

        let is_shutdown = matches!(request.query, Query::Shutdown);
        let response = Response {
            id: request.id,
            result: handle_query(request.query),
        };
        send(&mut writer, &response)?;

        if is_shutdown {
            log::info!("Shutting down");
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: impl AsRef<[u8]>) -> Vec<Response> {
        let mut out = Vec::new();
        serve(Cursor::new(input.as_ref()), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_ping_and_shutdown() {
        let responses = run(concat!(
            r#"{"id": 1, "query": {"type": "ping"}}"#,
            "\n",
            r#"{"id": 2, "query": {"type": "shutdown"}}"#,
            "\n",
            r#"{"id": 3, "query": {"type": "ping"}}"#,
            "\n",
        ));

        assert_eq!(responses.len(), 2);
        assert_eq!(
            responses[0],
            Response {
                id: 1,
                result: QueryResult::Success {
                    data: QueryData::Pong
                }
            }
        );
        assert_eq!(responses[1].id, 2);
    }

    #[test]
    fn test_malformed_line_gets_id_zero() {
        let responses = run("this is not json\n\n{\"id\": 7, \"query\": {\"type\": \"ping\"}}\n");

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].id, 0);
        assert!(matches!(responses[0].result, QueryResult::Error { .. }));
        assert_eq!(responses[1].id, 7);
    }

    #[test]
    fn test_invalid_utf8_line_does_not_stop_the_loop() {
        let mut input = b"\xff\xfe\n".to_vec();
        input.extend_from_slice(b"{\"id\": 9, \"query\": {\"type\": \"ping\"}}\n");
        let responses = run(input);

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].id, 0);
        match &responses[0].result {
            QueryResult::Error { message } => assert!(message.contains("UTF-8")),
            other => panic!("Unexpected result: {:?}", other),
        }
        assert_eq!(
            responses[1],
            Response {
                id: 9,
                result: QueryResult::Success {
                    data: QueryData::Pong
                }
            }
        );
    }

    #[test]
    fn test_synthesize_request() {
        let responses = run(concat!(
            r#"{"id": 4, "query": {"type": "synthesize", "descriptor": "#,
            r#"{"name": "Clock", "kind": "struct", "declared_accessibility": "public", "#,
            r#""own_members": [{"member": "property", "name": "Now", "#,
            r#""declared_accessibility": "public", "type": "System.DateTime", "#,
            r#""getter_accessibility": "public"}]}}}"#,
            "\n",
        ));

        match &responses[0].result {
            QueryResult::Success {
                data: QueryData::Generated { result, file },
            } => {
                assert_eq!(result.interface.name, "IClock");
                assert_eq!(file.hint_name, "_IClock__.g.cs");
                assert!(file.source.contains("global::System.DateTime Now { get; }"));
                assert!(file.source.contains("public partial struct Clock : IClock"));
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_descriptor_is_an_error_response() {
        let responses = run(concat!(
            r#"{"id": 5, "query": {"type": "synthesize", "descriptor": "#,
            r#"{"name": "Bad Name", "kind": "class", "declared_accessibility": "public"}}}"#,
            "\n",
        ));

        assert_eq!(responses[0].id, 5);
        match &responses[0].result {
            QueryResult::Error { message } => assert!(message.contains("Bad Name")),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_marker_request() {
        let result = handle_query(Query::Marker {
            namespace: Some("Gen".to_string()),
        });
        match result {
            QueryResult::Success {
                data: QueryData::Marker { file },
            } => assert_eq!(file.hint_name, "Gen_Interfaced__.g.cs"),
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
