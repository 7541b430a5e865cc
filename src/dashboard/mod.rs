use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::config::ModelArgs;
use crate::engine::EngineError;
use crate::forecast::{self, MatchInputs, Prediction, TeamStats};

/// Read-only settings shared by all requests.
#[derive(Clone)]
pub struct AppState {
    pub model: ModelArgs,
}

/// Build the Axum router for the dashboard.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/defaults", get(defaults_handler))
        .route("/api/config", get(config_handler))
        .route("/api/predict", get(predict_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Form fields as sent by the page. Anything missing takes the side's default.
#[derive(Debug, Default, Deserialize)]
pub struct PredictQuery {
    pub ta_goals: Option<f64>,
    pub ta_conceded: Option<f64>,
    pub ta_sot: Option<f64>,
    pub ta_chances: Option<f64>,
    pub ta_poss: Option<f64>,
    pub ta_pass: Option<f64>,
    pub tb_goals: Option<f64>,
    pub tb_conceded: Option<f64>,
    pub tb_sot: Option<f64>,
    pub tb_chances: Option<f64>,
    pub tb_poss: Option<f64>,
    pub tb_pass: Option<f64>,
    pub max_goals: Option<usize>,
}

impl PredictQuery {
    pub fn inputs(&self) -> MatchInputs {
        let a = TeamStats::DEFAULT_TEAM_A;
        let b = TeamStats::DEFAULT_TEAM_B;
        MatchInputs {
            team_a: TeamStats {
                goals_scored: self.ta_goals.unwrap_or(a.goals_scored),
                goals_conceded: self.ta_conceded.unwrap_or(a.goals_conceded),
                shots_on_target: self.ta_sot.unwrap_or(a.shots_on_target),
                chances_created: self.ta_chances.unwrap_or(a.chances_created),
                possession: self.ta_poss.unwrap_or(a.possession),
                pass_completion: self.ta_pass.unwrap_or(a.pass_completion),
            },
            team_b: TeamStats {
                goals_scored: self.tb_goals.unwrap_or(b.goals_scored),
                goals_conceded: self.tb_conceded.unwrap_or(b.goals_conceded),
                shots_on_target: self.tb_sot.unwrap_or(b.shots_on_target),
                chances_created: self.tb_chances.unwrap_or(b.chances_created),
                possession: self.tb_poss.unwrap_or(b.possession),
                pass_completion: self.tb_pass.unwrap_or(b.pass_completion),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ConfigView {
    max_goals: usize,
    max_goals_limit: usize,
    threshold: f64,
}

/// Serve the dashboard page.
async fn index_handler() -> impl IntoResponse {
    Html(DASHBOARD_HTML)
}

/// GET /api/defaults
async fn defaults_handler() -> Json<MatchInputs> {
    Json(MatchInputs::default())
}

/// GET /api/config
async fn config_handler(State(state): State<Arc<AppState>>) -> Json<ConfigView> {
    Json(ConfigView {
        max_goals: state.model.max_goals,
        max_goals_limit: forecast::MAX_GOALS_LIMIT,
        threshold: state.model.threshold,
    })
}

/// GET /api/predict?ta_goals=1.2&tb_goals=1.0
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PredictQuery>, QueryRejection>,
) -> Result<Json<Prediction>, (StatusCode, String)> {
    let Query(query) = query.map_err(|e| bad_request(e.body_text()))?;
    run_prediction(&state, &query)
        .map(Json)
        .map_err(|e| bad_request(e.to_string()))
}

fn bad_request(reason: String) -> (StatusCode, String) {
    warn!("Rejected prediction request: {}", reason);
    (
        StatusCode::BAD_REQUEST,
        format!("Invalid input detected: {}", reason),
    )
}

fn run_prediction(state: &AppState, query: &PredictQuery) -> Result<Prediction, EngineError> {
    let max_goals = query.max_goals.unwrap_or(state.model.max_goals);
    forecast::predict(&query.inputs(), max_goals)
}

/// Embedded single-file dashboard (HTML + CSS + JS)
const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>GoalOracle ⚽</title>
<style>
  :root {
    --bg: #f7f9fc;
    --card: #ffffff;
    --border: #dde3ec;
    --heading: #003366;
    --accent: #00D0C0;
    --red: #d0344a;
    --text: #1c2333;
    --muted: #6b7489;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  main { max-width: 720px; margin: 0 auto; padding: 1.5rem 1rem; display: grid; gap: 1.2rem; }
  h1 { text-align: center; font-size: 1.6rem; color: var(--heading); }
  h3 { text-align: center; color: var(--heading); margin-bottom: .6rem; }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; padding: 1rem 1.2rem; }
  .field { display: grid; grid-template-columns: 1fr 120px; align-items: center; gap: .5rem; margin: .35rem 0; }
  .field label { font-size: .9rem; }
  .field input { padding: .35rem .5rem; border: 1px solid var(--border); border-radius: 6px; font-size: .9rem; }
  .buttons { display: flex; justify-content: center; gap: 1rem; }
  button {
    background-color: black; color: white; font-size: 16px; font-weight: bold;
    height: 48px; width: 120px; border-radius: 12px; border: none; cursor: pointer;
    transition: all 0.25s ease;
  }
  button:hover {
    background-color: var(--accent); color: black;
    box-shadow: 0 0 10px var(--accent), 0 0 20px var(--accent), 0 0 30px var(--accent);
  }
  @media (max-width: 600px) { button { width: 90%; } }
  #results { display: none; }
  #results p { margin: .3rem 0; }
  #error { display: none; color: var(--red); font-weight: 600; text-align: center; }
  #chart-container { display: flex; gap: .6rem; align-items: stretch; margin-top: .8rem; }
  #heatmap { width: 100%; max-width: 560px; }
  #legend { width: 18px; border: 1px solid var(--border); }
  .legend-labels { display: flex; flex-direction: column; justify-content: space-between; font-size: .75rem; color: var(--muted); }
  hr { border: none; border-top: 1px solid var(--border); margin: .8rem 0; }
  footer { text-align: center; color: var(--muted); font-size: .8rem; }
</style>
</head>
<body>
<main>
  <h1>GoalOracle ⚽</h1>

  <div class="panel" id="team-a"><h3>Team A — Inputs</h3></div>
  <div class="panel" id="team-b"><h3>Team B — Inputs</h3></div>

  <div class="buttons">
    <button id="predict-btn">Predict</button>
    <button id="reset-btn">Reset</button>
  </div>

  <div id="error"></div>

  <div class="panel" id="results">
    <h3>Prediction Results</h3>
    <p id="mode-line"></p>
    <p id="outcome-line"></p>
    <hr>
    <div id="chart-container">
      <canvas id="heatmap" width="560" height="480"></canvas>
      <canvas id="legend" width="18" height="480"></canvas>
      <div class="legend-labels"><span id="legend-max"></span><span>0.0%</span></div>
    </div>
  </div>

  <footer>GoalOracle — Poisson-based score prediction using the 'Goals Scored' inputs as λ for each team.</footer>
</main>

<script>
const FIELDS = [
  ['goals', 'Goals Scored (λ)', 'goals_scored', 0.1, null],
  ['conceded', 'Goals Conceded', 'goals_conceded', 0.1, null],
  ['sot', 'Shots on Target', 'shots_on_target', 0.1, null],
  ['chances', 'Chances Created', 'chances_created', 0.1, null],
  ['poss', 'Possession (%)', 'possession', 0.1, 100],
  ['pass', 'Pass Completion (%)', 'pass_completion', 0.1, 100],
];
const pct2 = v => (v * 100).toFixed(2) + '%';
const pct1 = v => (v * 100).toFixed(1) + '%';
let threshold = 0.001;

function buildForm() {
  for (const [prefix, panel] of [['ta', 'team-a'], ['tb', 'team-b']]) {
    const el = document.getElementById(panel);
    for (const [key, label, , step, max] of FIELDS) {
      const row = document.createElement('div');
      row.className = 'field';
      const id = `${prefix}_${key}`;
      row.innerHTML = `<label for="${id}">${label}</label>
        <input type="number" id="${id}" min="0" ${max !== null ? `max="${max}"` : ''} step="${step}">`;
      el.appendChild(row);
    }
  }
}

async function resetInputs() {
  const r = await fetch('/api/defaults');
  if (!r.ok) return;
  const d = await r.json();
  for (const [prefix, team] of [['ta', d.team_a], ['tb', d.team_b]]) {
    for (const [key, , field] of FIELDS) {
      document.getElementById(`${prefix}_${key}`).value = team[field];
    }
  }
  document.getElementById('results').style.display = 'none';
  document.getElementById('error').style.display = 'none';
}

async function loadConfig() {
  const r = await fetch('/api/config');
  if (!r.ok) return;
  const c = await r.json();
  threshold = c.threshold;
}

async function predict() {
  const params = new URLSearchParams();
  for (const prefix of ['ta', 'tb']) {
    for (const [key] of FIELDS) {
      const v = document.getElementById(`${prefix}_${key}`).value;
      if (v !== '') params.set(`${prefix}_${key}`, v);
    }
  }
  const errEl = document.getElementById('error');
  const r = await fetch('/api/predict?' + params.toString());
  if (!r.ok) {
    errEl.textContent = await r.text();
    errEl.style.display = 'block';
    document.getElementById('results').style.display = 'none';
    return;
  }
  errEl.style.display = 'none';
  const p = await r.json();
  document.getElementById('mode-line').textContent =
    `Most Probable Score: ${p.mode.team_a_goals} - ${p.mode.team_b_goals} (${pct2(p.mode.probability)})`;
  document.getElementById('outcome-line').textContent =
    `Team A Win: ${pct2(p.outcome.team_a_win)}   |   Draw: ${pct2(p.outcome.draw)}   |   Team B Win: ${pct2(p.outcome.team_b_win)}`;
  document.getElementById('results').style.display = 'block';
  drawHeatmap(p.matrix);
}

// Cool-to-warm diverging scale, t in [0, 1].
function coolwarm(t) {
  const lo = [59, 76, 192], mid = [221, 221, 221], hi = [180, 4, 38];
  const [a, b, u] = t < 0.5 ? [lo, mid, t / 0.5] : [mid, hi, (t - 0.5) / 0.5];
  const c = a.map((x, i) => Math.round(x + (b[i] - x) * u));
  return `rgb(${c[0]},${c[1]},${c[2]})`;
}

function drawHeatmap(matrix) {
  const canvas = document.getElementById('heatmap');
  const ctx = canvas.getContext('2d');
  const W = canvas.width, H = canvas.height;
  const pad = { left: 56, bottom: 48, top: 28, right: 8 };
  const n = matrix.length;
  const cw = (W - pad.left - pad.right) / n;
  const ch = (H - pad.top - pad.bottom) / n;
  const max = Math.max(...matrix.flat()) || 1;

  ctx.clearRect(0, 0, W, H);
  ctx.fillStyle = '#1c2333';
  ctx.font = 'bold 14px system-ui';
  ctx.textAlign = 'center';
  ctx.fillText('Score Probability Matrix', W / 2, 18);

  // Row 0 at the bottom
  for (let i = 0; i < n; i++) {
    for (let j = 0; j < n; j++) {
      const p = matrix[i][j];
      const x = pad.left + j * cw;
      const y = H - pad.bottom - (i + 1) * ch;
      ctx.fillStyle = coolwarm(p / max);
      ctx.fillRect(x, y, cw, ch);
      if (p > threshold) {
        ctx.fillStyle = '#000';
        ctx.font = '10px system-ui';
        ctx.textBaseline = 'middle';
        ctx.fillText(pct1(p), x + cw / 2, y + ch / 2);
      }
    }
  }

  ctx.fillStyle = '#1c2333';
  ctx.font = '11px system-ui';
  for (let k = 0; k < n; k++) {
    ctx.fillText(String(k), pad.left + k * cw + cw / 2, H - pad.bottom + 14);
    ctx.fillText(String(k), pad.left - 12, H - pad.bottom - k * ch - ch / 2);
  }
  ctx.font = '13px system-ui';
  ctx.fillText('Team B Goals', pad.left + (W - pad.left - pad.right) / 2, H - 10);
  ctx.save();
  ctx.translate(14, pad.top + (H - pad.top - pad.bottom) / 2);
  ctx.rotate(-Math.PI / 2);
  ctx.fillText('Team A Goals', 0, 0);
  ctx.restore();

  const legend = document.getElementById('legend');
  const lctx = legend.getContext('2d');
  for (let y = 0; y < legend.height; y++) {
    lctx.fillStyle = coolwarm(1 - y / legend.height);
    lctx.fillRect(0, y, legend.width, 1);
  }
  document.getElementById('legend-max').textContent = pct1(max);
}

document.addEventListener('DOMContentLoaded', async () => {
  buildForm();
  document.getElementById('predict-btn').addEventListener('click', predict);
  document.getElementById('reset-btn').addEventListener('click', resetInputs);
  await Promise.all([loadConfig(), resetInputs()]);
});
</script>
</body>
</html>"#;
