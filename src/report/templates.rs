pub const HTML_TEMPLATE_NAME: &str = "report.html";
pub const MARKDOWN_TEMPLATE_NAME: &str = "report.md";

pub const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Retention Report - {{ report.alias }}</title>
<style>
  body { font-family: "Segoe UI", Arial, sans-serif; margin: 2rem auto; max-width: 960px; color: #222; }
  h1 { border-bottom: 3px solid #0b5cab; padding-bottom: .4rem; }
  .meta { color: #666; margin-bottom: 1.5rem; }
  .verdict { display: inline-block; padding: .3rem .8rem; border-radius: 4px; font-weight: bold; color: #fff; }
  .verdict.RETAIN { background: #c0392b; }
  .verdict.PURGE { background: #27ae60; }
  section { margin: 1.2rem 0; border-left: 5px solid #bbb; padding-left: 1rem; }
  section.ok { border-color: #27ae60; }
  section.warn { border-color: #e67e22; }
  section.bad { border-color: #c0392b; }
  table { border-collapse: collapse; width: 100%; }
  th { text-align: left; width: 30%; color: #444; font-weight: 600; }
  th, td { padding: .35rem .5rem; border-bottom: 1px solid #eee; vertical-align: top; }
</style>
</head>
<body>
<h1>Retention Report: {{ report.alias }}</h1>
<div class="meta">Generated {{ report.generated_at }}</div>
<div class="verdict {{ report.verdict }}">{{ report.verdict }}</div>
{% for section in report.sections %}
<section class="{{ section.tone }}">
  <h2>{{ section.title }}</h2>
  <table>
  {% for row in section.rows %}
    <tr><th>{{ row.label }}</th><td>{{ row.value }}</td></tr>
  {% endfor %}
  </table>
</section>
{% endfor %}
</body>
</html>
"#;

pub const MARKDOWN_TEMPLATE: &str = r"# Retention Report: {{ report.alias }}

Generated {{ report.generated_at }}

**Verdict: {{ report.verdict }}**
{% for section in report.sections %}
## {{ section.title }}

| Field | Value |
|---|---|
{% for row in section.rows -%}
| {{ row.label }} | {{ row.value | replace(from='|', to='\|') }} |
{% endfor -%}
{% endfor %}
";
