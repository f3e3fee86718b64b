// Shared prompt-building utilities.
// Prompt texts live next to the service that sends them; this file only knows how to fill them.

/// Substitutes `{name}` placeholders in a single left-to-right pass.
///
/// Inserted values are never rescanned, so a resume that happens to contain `{resume}`
/// stays literal. Braces that do not name a known placeholder are copied through untouched,
/// which keeps JSON examples inside templates intact.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let matched = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match matched {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
