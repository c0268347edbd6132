/// Cleans extracted document text: carriage returns become spaces, runs of
/// newlines collapse to one, and surrounding whitespace is trimmed.
/// Case is left alone; callers lowercase where they need to.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_newline = false;

    for ch in text.chars() {
        match ch {
            '\r' => {
                out.push(' ');
                prev_newline = false;
            }
            '\n' => {
                if !prev_newline {
                    out.push('\n');
                }
                prev_newline = true;
            }
            _ => {
                out.push(ch);
                prev_newline = false;
            }
        }
    }

    out.trim().to_string()
}
