//! XML bodies for the `Translate` and `TranslateArray` endpoints.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;

use crate::error::{Result, TranslateError};

/// Namespace the service requires on every `<string>` in a batch request.
pub const ARRAYS_NAMESPACE: &str = "http://schemas.microsoft.com/2003/10/Serialization/Arrays";

#[derive(Debug, Serialize)]
#[serde(rename = "TranslateArrayRequest")]
struct TranslateArrayRequest<'a> {
    #[serde(rename = "AppId")]
    app_id: &'a str,
    #[serde(rename = "From")]
    from: &'a str,
    #[serde(rename = "Texts")]
    texts: Texts<'a>,
    #[serde(rename = "Options")]
    options: &'a str,
    #[serde(rename = "To")]
    to: &'a str,
}

#[derive(Debug, Serialize)]
struct Texts<'a> {
    #[serde(rename = "string")]
    strings: Vec<ArrayString<'a>>,
}

#[derive(Debug, Serialize)]
struct ArrayString<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "$text")]
    text: &'a str,
}

/// Encode a batch request, one `<string>` per input in input order.
pub fn encode_array_request<S: AsRef<str>>(texts: &[S], from: &str, to: &str) -> Result<String> {
    let request = TranslateArrayRequest {
        app_id: "",
        from,
        texts: Texts {
            strings: texts
                .iter()
                .map(|text| ArrayString {
                    xmlns: ARRAYS_NAMESPACE,
                    text: text.as_ref(),
                })
                .collect(),
        },
        options: "",
        to,
    };
    Ok(quick_xml::se::to_string(&request)?)
}

/// Decode the bare `<string>` element returned by `Translate`.
///
/// The element's character data is returned exactly as sent, whitespace
/// and CDATA sections included.
pub fn decode_string(body: &str) -> Result<String> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(false);

    let mut depth = 0usize;
    let mut seen_root = false;
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Start(_) => {
                seen_root = true;
                depth += 1;
            }
            Event::End(_) if depth == 0 => return Err(decode_error("unexpected closing tag")),
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(text);
                }
            }
            Event::Empty(_) if depth == 0 => return Ok(String::new()),
            event @ (Event::Text(_) | Event::CData(_)) if depth == 1 => {
                push_text(&mut text, &event)?;
            }
            Event::Eof => {
                return Err(decode_error(if seen_root {
                    "unexpected end of document"
                } else {
                    "missing <string> element"
                }));
            }
            _ => {}
        }
    }
}

/// One entry of a batch response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateArrayItem {
    pub translated_text: String,
    /// Language the service detected or was told, when reported.
    pub from: Option<String>,
    /// Per-item failure reported by the service.
    pub error: Option<String>,
    /// Opaque state echoed back from the request options.
    pub state: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemField {
    TranslatedText,
    From,
    Error,
    State,
}

impl ItemField {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"TranslatedText" => Some(Self::TranslatedText),
            b"From" => Some(Self::From),
            b"Error" => Some(Self::Error),
            b"State" => Some(Self::State),
            _ => None,
        }
    }
}

#[derive(Default)]
struct ItemBuilder {
    translated_text: String,
    from: String,
    error: String,
    state: String,
}

impl ItemBuilder {
    fn field_mut(&mut self, field: ItemField) -> &mut String {
        match field {
            ItemField::TranslatedText => &mut self.translated_text,
            ItemField::From => &mut self.from,
            ItemField::Error => &mut self.error,
            ItemField::State => &mut self.state,
        }
    }

    fn finish(self) -> TranslateArrayItem {
        TranslateArrayItem {
            translated_text: self.translated_text,
            from: non_empty(self.from),
            error: non_empty(self.error),
            state: non_empty(self.state),
        }
    }
}

/// Decode `<ArrayOfTranslateArrayResponse>` in document order.
///
/// `TranslatedText` keeps its character data verbatim. Elements the
/// service adds that are not modelled here, such as the sentence length
/// arrays, are skipped.
pub fn decode_array_response(body: &str) -> Result<Vec<TranslateArrayItem>> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(false);

    let mut depth = 0usize;
    let mut seen_root = false;
    let mut items = Vec::new();
    let mut current: Option<ItemBuilder> = None;
    let mut field: Option<ItemField> = None;
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                match depth {
                    1 => seen_root = true,
                    2 if e.local_name().as_ref() == b"TranslateArrayResponse" => {
                        current = Some(ItemBuilder::default());
                    }
                    3 if current.is_some() => {
                        field = ItemField::from_local_name(e.local_name().as_ref());
                    }
                    _ => {}
                }
            }
            Event::End(_) if depth == 0 => return Err(decode_error("unexpected closing tag")),
            Event::End(_) => {
                match depth {
                    1 => return Ok(items),
                    2 => items.extend(current.take().map(ItemBuilder::finish)),
                    3 => field = None,
                    _ => {}
                }
                depth -= 1;
            }
            Event::Empty(e) => match depth {
                0 => return Ok(items),
                1 if e.local_name().as_ref() == b"TranslateArrayResponse" => {
                    items.push(ItemBuilder::default().finish());
                }
                _ => {}
            },
            event @ (Event::Text(_) | Event::CData(_)) if depth == 3 => {
                if let (Some(item), Some(field)) = (current.as_mut(), field) {
                    push_text(item.field_mut(field), &event)?;
                }
            }
            Event::Eof => {
                return Err(decode_error(if seen_root {
                    "unexpected end of document"
                } else {
                    "missing <ArrayOfTranslateArrayResponse> element"
                }));
            }
            _ => {}
        }
    }
}

/// Append the character data of a text or CDATA event, unescaped.
fn push_text(buf: &mut String, event: &Event<'_>) -> Result<()> {
    match event {
        Event::Text(text) => buf.push_str(&text.unescape()?),
        Event::CData(data) => buf.push_str(
            std::str::from_utf8(&data[..]).map_err(|err| decode_error(&err.to_string()))?,
        ),
        _ => {}
    }
    Ok(())
}

fn decode_error(message: &str) -> TranslateError {
    TranslateError::Decode(message.to_string())
}

fn non_empty(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}
