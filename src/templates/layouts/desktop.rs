use maud::{html, Markup, PreEscaped, DOCTYPE};

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLES)) }
            }
            body {
                header class="site-header" {
                    h3 { "Mortgage vs Rent" }
                    nav {
                        ul {
                            li { a href="/" { "Search" } }
                        }
                    }
                }
                main class="container" {
                    (content)
                }
            }
        }
    }
}

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #222; }
.site-header { display: flex; align-items: center; justify-content: space-between; padding: 0.75rem 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.site-header ul { list-style: none; margin: 0; padding: 0; }
.container { max-width: 1080px; margin: 2rem auto; padding: 0 1rem; }
.card { border: 1px solid #e5e7eb; border-radius: 8px; padding: 1rem 1.25rem; margin-bottom: 1.5rem; }
.form-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 0.75rem 1.25rem; }
.form-grid label { display: flex; flex-direction: column; font-size: 0.9rem; gap: 0.25rem; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 0.5rem 0.75rem; border-bottom: 1px solid #eee; font-size: 0.9rem; }
th { background: #f9fafb; text-transform: uppercase; font-size: 0.75rem; color: #555; }
.notice { color: #92400e; background: #fef3c7; padding: 0.5rem 0.75rem; border-radius: 6px; }
.error { color: #991b1b; background: #fee2e2; padding: 0.5rem 0.75rem; border-radius: 6px; }
"#;
