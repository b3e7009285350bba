use crate::header;
use crate::FrontMatterError;

/// Header fields of a post as they appear on the wire.
///
/// Values are kept as text; interpreting the date is the caller's concern.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

/// A post split into header and body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostDocument {
    pub front_matter: FrontMatter,
    pub body: String,
}

/// Read a post from Markdown with front matter.
///
/// The header is read as YAML. A header that is not valid YAML, or not a mapping, is read
/// with a tolerant `key: value` line scan instead so that hand-edited posts still load.
///
/// The writer puts one blank line between the closing delimiter and the body and ends the file
/// with a newline; exactly one of each is removed here when present.
///
/// # Errors
///
/// Returns `FrontMatterError::MissingFrontMatter` if the first line is not `---`, and
/// `FrontMatterError::UnterminatedFrontMatter` if no closing `---` line follows it.
pub fn read_post_markdown(input: &str) -> Result<PostDocument, FrontMatterError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let (front_matter, body) = split_front_matter(input)?;

    let front_matter = header::parse_yaml(front_matter)
        .unwrap_or_else(|_| header::scan_lines(front_matter));

    let body = body
        .strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body);
    let body = body.strip_suffix('\n').unwrap_or(body);

    Ok(PostDocument {
        front_matter,
        body: body.to_string(),
    })
}

/// Write a post to Markdown with front matter.
///
/// The body is written verbatim. Only the first closing `---` ends the header on read, so a
/// body containing its own `---` lines is safe, but a body is never escaped.
pub fn write_post_markdown(document: &PostDocument) -> Result<String, FrontMatterError> {
    let fm = &document.front_matter;

    let mut out = String::new();
    out.push_str("---\n");
    out.push_str(&format!(
        "title: {}\n",
        header::render_scalar(fm.title.as_deref().unwrap_or_default())?
    ));
    out.push_str(&format!("date: {}\n", fm.date.as_deref().unwrap_or_default()));
    out.push_str(&format!(
        "categories: [{}]\n",
        header::render_flow_items(&fm.categories)?
    ));
    out.push_str(&format!("tags: [{}]\n", header::render_flow_items(&fm.tags)?));
    out.push_str("---\n\n");
    out.push_str(&document.body);
    out.push('\n');
    Ok(out)
}

fn split_front_matter(input: &str) -> Result<(&str, &str), FrontMatterError> {
    let mut chunks = input.split_inclusive('\n');

    let first = chunks.next().ok_or(FrontMatterError::MissingFrontMatter)?;
    let first_line = first.trim_end_matches(['\n', '\r']);
    if first_line != "---" {
        return Err(FrontMatterError::MissingFrontMatter);
    }

    let mut offset = first.len();

    // Find closing delimiter line and return slices into the input.
    for chunk in chunks {
        let line = chunk.trim_end_matches(['\n', '\r']);
        if line == "---" {
            let front = &input[first.len()..offset];
            let body = &input[offset + chunk.len()..];
            return Ok((front, body));
        }
        offset += chunk.len();
    }

    Err(FrontMatterError::UnterminatedFrontMatter)
}
