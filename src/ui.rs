pub fn render_index() -> String {
    render_page("Link Shortener", INDEX_BODY, Some(INDEX_SCRIPT))
}

pub fn render_stats() -> String {
    render_page("Link Stats", STATS_BODY, Some(STATS_SCRIPT))
}

pub fn render_not_found() -> String {
    render_page("Link not found", NOT_FOUND_BODY, None)
}

// Pages with a script get the chart section and the shared chart code.
fn render_page(title: &str, body: &str, script: Option<&str>) -> String {
    let (chart, chart_script, script) = match script {
        Some(script) => (CHART_SECTION, CHART_SCRIPT, script),
        None => ("", "", ""),
    };
    LAYOUT_HTML
        .replace("{{TITLE}}", title)
        .replace("{{BODY}}", body)
        .replace("{{CHART}}", chart)
        .replace("{{CHART_SCRIPT}}", chart_script)
        .replace("{{SCRIPT}}", script)
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg-1: #f4f6fb;
      --bg-2: #dfe7f7;
      --ink: #1f2430;
      --accent: #3461d9;
      --accent-2: #1f2f55;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(31, 47, 85, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #eef2fb 60%, #f8f9fc 100%);
      color: var(--ink);
      font-family: "Segoe UI", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: baseline;
      gap: 12px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    nav a {
      color: var(--accent);
      font-weight: 600;
      text-decoration: none;
    }

    .subtitle {
      margin: 0;
      color: #5d6373;
    }

    form.inline {
      display: flex;
      gap: 12px;
      flex-wrap: wrap;
    }

    input[type="text"] {
      flex: 1 1 320px;
      padding: 14px 18px;
      border-radius: 999px;
      border: 1px solid rgba(31, 47, 85, 0.2);
      font-size: 1rem;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button:disabled {
      opacity: 0.6;
      cursor: progress;
    }

    .result {
      display: none;
      gap: 12px;
      align-items: center;
      flex-wrap: wrap;
    }

    .result.visible {
      display: flex;
    }

    .result code {
      padding: 10px 14px;
      background: white;
      border-radius: 12px;
      border: 1px solid rgba(31, 47, 85, 0.1);
    }

    .chart-area {
      display: none;
      gap: 16px;
    }

    .chart-area.visible {
      display: grid;
    }

    .chart-header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    .chart-header h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(31, 47, 85, 0.08);
      border-radius: 999px;
    }

    .tab {
      background: transparent;
      padding: 8px 14px;
      font-size: 0.9rem;
      color: #5d6373;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(31, 47, 85, 0.08);
    }

    #chart {
      width: 100%;
      height: 260px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 3;
    }

    .chart-point {
      fill: white;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-grid {
      stroke: rgba(31, 47, 85, 0.12);
    }

    .chart-label {
      fill: #6c7283;
      font-size: 11px;
    }

    .status {
      min-height: 1.2em;
      color: #5d6373;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .missing {
      display: grid;
      justify-items: center;
      gap: 16px;
      text-align: center;
      padding: 24px 0 8px;
    }

    .missing .code {
      margin: 0;
      font-size: 4rem;
      font-weight: 700;
      color: var(--accent-2);
    }

    a.button {
      border-radius: 999px;
      padding: 14px 20px;
      font-weight: 600;
      background: var(--accent);
      color: white;
      text-decoration: none;
    }
  </style>
</head>
<body>
  <main class="app">
{{BODY}}
{{CHART}}    <div class="status" id="status"></div>
  </main>

  <script>
{{CHART_SCRIPT}}
{{SCRIPT}}
  </script>
</body>
</html>
"#;

const INDEX_BODY: &str = r#"    <header>
      <div>
        <h1>Link Shortener</h1>
        <p class="subtitle">Shorten a link, then watch its clicks.</p>
      </div>
      <nav><a href="/stats">Look up a link</a></nav>
    </header>

    <form class="inline" id="shorten-form">
      <input type="text" id="long-url" placeholder="https://example.com/a/very/long/path" autocomplete="off" />
      <button type="submit" id="shorten-btn">Shorten</button>
    </form>

    <section class="result" id="result">
      <code id="short-url"></code>
      <button type="button" id="copy-btn">Copy</button>
      <button type="button" id="refresh-btn">Show clicks</button>
    </section>
"#;

const STATS_BODY: &str = r#"    <header>
      <div>
        <h1>Link Stats</h1>
        <p class="subtitle">Paste a short link to see how often it was opened.</p>
      </div>
      <nav><a href="/">Shorten a link</a></nav>
    </header>

    <form class="inline" id="lookup-form">
      <input type="text" id="lookup-url" placeholder="https://sho.rt/link/abc123" autocomplete="off" />
      <button type="submit" id="lookup-btn">Look up</button>
    </form>
"#;

const CHART_SECTION: &str = r#"    <section class="chart-area" id="chart-area">
      <div class="chart-header">
        <div>
          <h2>Click history</h2>
          <p class="subtitle" id="total">Total clicks: 0</p>
        </div>
        <div class="tabs" role="tablist">
          <button class="tab active" type="button" data-period="hour" role="tab">24 hours</button>
          <button class="tab" type="button" data-period="day" role="tab">7 days</button>
          <button class="tab" type="button" data-period="dayOfMonth" role="tab">30 days</button>
          <button class="tab" type="button" data-period="month" role="tab">12 months</button>
        </div>
      </div>
      <div class="chart-card">
        <svg id="chart" viewBox="0 0 600 260" aria-label="Click history chart" role="img"></svg>
      </div>
    </section>

"#;

const NOT_FOUND_BODY: &str = r#"    <section class="missing">
      <p class="code">404</p>
      <h1>Link not found</h1>
      <p class="subtitle">This short link does not exist or is no longer available.</p>
      <a class="button" href="/">Back to the shortener</a>
    </section>
"#;

const CHART_SCRIPT: &str = r#"    const statusEl = document.getElementById('status');
    const chartEl = document.getElementById('chart');
    const chartArea = document.getElementById('chart-area');
    const totalEl = document.getElementById('total');
    const tabs = Array.from(document.querySelectorAll('.tab'));

    let activePeriod = 'hour';
    let onPeriodChange = () => {};

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const readError = async (res) => {
      const text = await res.text();
      return new Error(text || `Request failed (${res.status})`);
    };

    const renderLineChart = (buckets) => {
      const width = 600;
      const height = 260;
      const paddingX = 44;
      const paddingY = 34;
      const top = 24;

      const max = Math.max(1, ...buckets.map((bucket) => bucket.count));
      const xStep = buckets.length > 1 ? (width - paddingX * 2) / (buckets.length - 1) : 0;
      const scaleY = (height - top - paddingY) / max;
      const x = (index) => paddingX + index * xStep;
      const y = (value) => height - paddingY - value * scaleY;

      const path = buckets
        .map((bucket, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(bucket.count).toFixed(2)}`)
        .join(' ');

      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = (max * i) / ticks;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${yPos + 4}" text-anchor="end">${Math.round(value * 10) / 10}</text>`;
      }

      const labelEvery = buckets.length > 12 ? 3 : 1;
      const xLabels = buckets
        .map((bucket, index) => {
          if (index % labelEvery !== 0) {
            return '';
          }
          return `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 18}" text-anchor="middle">${bucket.label}</text>`;
        })
        .join('');

      const circles = buckets
        .map((bucket, index) => `<circle class="chart-point" cx="${x(index)}" cy="${y(bucket.count)}" r="4"><title>${bucket.label}: ${bucket.count}</title></circle>`)
        .join('');

      chartEl.innerHTML = `${grid}<path class="chart-line" d="${path}" />${circles}${xLabels}`;
    };

    const showHistory = (history) => {
      chartArea.classList.add('visible');
      totalEl.textContent = `Total clicks: ${history.total_clicks}`;
      renderLineChart(history.buckets);
    };

    tabs.forEach((button) => {
      button.addEventListener('click', () => {
        activePeriod = button.dataset.period;
        tabs.forEach((tab) => tab.classList.toggle('active', tab === button));
        onPeriodChange();
      });
    });
"#;

const INDEX_SCRIPT: &str = r#"    const form = document.getElementById('shorten-form');
    const longUrlEl = document.getElementById('long-url');
    const shortenBtn = document.getElementById('shorten-btn');
    const resultEl = document.getElementById('result');
    const shortUrlEl = document.getElementById('short-url');
    let shortCode = null;

    const loadHistory = async () => {
      if (!shortCode) {
        return;
      }
      const res = await fetch(`/api/history/${encodeURIComponent(shortCode)}?period=${activePeriod}`);
      if (!res.ok) {
        throw await readError(res);
      }
      showHistory(await res.json());
    };

    onPeriodChange = () => loadHistory().catch((err) => setStatus(err.message, 'error'));

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      const longUrl = longUrlEl.value.trim();
      if (!longUrl) {
        setStatus('Enter a URL to shorten.', 'error');
        return;
      }
      shortenBtn.disabled = true;
      try {
        const res = await fetch('/api/links', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ long_url: longUrl })
        });
        if (!res.ok) {
          throw await readError(res);
        }
        const link = await res.json();
        shortCode = link.short_code;
        shortUrlEl.textContent = link.short_url;
        resultEl.classList.add('visible');
        setStatus('Link shortened.', 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      } finally {
        shortenBtn.disabled = false;
      }
    });

    document.getElementById('copy-btn').addEventListener('click', async () => {
      try {
        await navigator.clipboard.writeText(shortUrlEl.textContent);
        setStatus('Copied to clipboard.', 'ok');
      } catch (err) {
        setStatus('Could not copy the link.', 'error');
      }
    });

    document.getElementById('refresh-btn').addEventListener('click', onPeriodChange);
"#;

const STATS_SCRIPT: &str = r#"    const form = document.getElementById('lookup-form');
    const lookupUrlEl = document.getElementById('lookup-url');
    const lookupBtn = document.getElementById('lookup-btn');
    let lookupUrl = null;

    const loadHistory = async () => {
      if (!lookupUrl) {
        return;
      }
      const params = new URLSearchParams({ url: lookupUrl, period: activePeriod });
      const res = await fetch(`/api/lookup?${params}`);
      if (!res.ok) {
        throw await readError(res);
      }
      showHistory(await res.json());
    };

    onPeriodChange = () => loadHistory().catch((err) => setStatus(err.message, 'error'));

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      const value = lookupUrlEl.value.trim();
      if (!value) {
        setStatus('Paste a short link to look up.', 'error');
        return;
      }
      lookupUrl = value;
      lookupBtn.disabled = true;
      try {
        await loadHistory();
        setStatus('Click history loaded.', 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      } finally {
        lookupBtn.disabled = false;
      }
    });
"#;
