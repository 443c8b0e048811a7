//! Embedded dashboard page.
//!
//! A single self-contained HTML page driving the JSON API: ingest form,
//! analyze/clear buttons, metrics table, comment list, and the rendered
//! word cloud. Kept deliberately small; richer frontends talk to the same
//! endpoints.

pub const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>eConsultation AI Dashboard</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 40px; background: #f5f5f5; }
    .container { max-width: 1100px; margin: 0 auto; background: white; padding: 24px;
                 border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
    h1 { color: #333; text-align: center; }
    h2 { color: #444; border-bottom: 1px solid #eee; padding-bottom: 4px; }
    button { margin: 4px; padding: 8px 14px; border: none; border-radius: 4px;
             background: #3B82F6; color: white; cursor: pointer; }
    button.danger { background: #EF4444; }
    textarea, input { width: 100%; box-sizing: border-box; margin: 4px 0; padding: 6px; }
    table { border-collapse: collapse; width: 100%; margin-top: 8px; }
    th, td { border: 1px solid #ddd; padding: 6px 8px; text-align: left; font-size: 14px; }
    th { background: #f0f0f0; }
    #wordcloud-img { max-width: 100%; margin-top: 8px; }
    pre { background: #f8f8f8; padding: 8px; overflow-x: auto; }
  </style>
</head>
<body>
<div class="container">
  <h1>eConsultation AI Dashboard</h1>

  <h2>Ingest</h2>
  <textarea id="comment-text" rows="3" placeholder="Comment text"></textarea>
  <input id="comment-clause" placeholder="Clause (default: overall)">
  <button onclick="ingest()">Ingest comment</button>
  <button onclick="analyze()">Run analysis</button>
  <button class="danger" onclick="clearAll()">Clear all</button>
  <pre id="status"></pre>

  <h2>Metrics</h2>
  <pre id="metrics"></pre>

  <h2>Comments</h2>
  <table id="comments">
    <thead>
      <tr><th>ID</th><th>Clause</th><th>Intent</th><th>Score</th><th>Summary</th><th>Keywords</th></tr>
    </thead>
    <tbody></tbody>
  </table>

  <h2>Word cloud</h2>
  <img id="wordcloud-img" alt="word cloud (run analysis first)">
</div>

<script>
async function post(path, body, headers) {
  const res = await fetch(path, { method: 'POST', body: body, headers: headers });
  return res.json();
}

function setStatus(obj) {
  document.getElementById('status').textContent = JSON.stringify(obj);
}

async function ingest() {
  const text = document.getElementById('comment-text').value;
  const clause = document.getElementById('comment-clause').value || 'overall';
  const body = new URLSearchParams({ text: text, clause: clause });
  setStatus(await post('/ingest', body));
  refresh();
}

async function analyze() {
  setStatus(await post('/analyze'));
  refresh();
  const img = document.getElementById('wordcloud-img');
  img.src = '/wordcloud?t=' + Date.now();
}

async function clearAll() {
  setStatus(await post('/clear'));
  refresh();
}

async function refresh() {
  const metrics = await (await fetch('/metrics')).json();
  document.getElementById('metrics').textContent = JSON.stringify(metrics, null, 2);

  const data = await (await fetch('/comments')).json();
  const tbody = document.querySelector('#comments tbody');
  tbody.innerHTML = '';
  for (const item of data.items) {
    const row = tbody.insertRow();
    for (const value of [item.id, item.clause, item.sentiment, item.score,
                         item.summary, (item.keywords || []).join(', ')]) {
      row.insertCell().textContent = value;
    }
  }
}

refresh();
</script>
</body>
</html>
"#;
