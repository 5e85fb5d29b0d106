//! The built-in templates. Each can be replaced by a file named in the
//! project's `templates` section.

/// Rendered with `.target`, the canonical location of the post relative to
/// the legacy page.
pub const REDIRECT: &str = r#"<!DOCTYPE HTML>
<html lang="en-US">
    <head>
        <meta charset="UTF-8">
        <meta http-equiv="refresh" content="0; url={{.target}}">
        <script type="text/javascript">
            window.location.href = "{{.target}}"
        </script>
        <title>Page Redirection</title>
    </head>
    <body>
        If you are not redirected automatically <a href='{{.target}}'>please see here</a>.
    </body>
</html>
"#;

/// Rendered for each year and tag with `.title` and `.posts`.
pub const INDEX: &str = r#"
{{.title}}
--------------------------------------------------------------------------------

.. toctree::
    :caption: {{.title}}
    :maxdepth: 1
{{range .posts}}
    {{.doc}}{{end}}
"#;

/// Rendered once with `.latest`, `.tags`, and `.years`.
pub const CONTENTS: &str = r#"
.. toctree::
    :caption: Latest
    :maxdepth: 1
{{range .latest}}
    {{.doc}}{{end}}

.. toctree::
    :caption: Tags
    :maxdepth: 2
{{range .tags}}
    {{.doc}}{{end}}

.. toctree::
    :caption: Archive
    :maxdepth: 2
    :hidden:
{{range .years}}
    {{.doc}}{{end}}
"#;
