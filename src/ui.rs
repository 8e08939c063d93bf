use crate::config::ExperimentConfig;

pub fn render_index(config: &ExperimentConfig) -> String {
    INDEX_HTML
        .replace("{{NAME}}", &config.name)
        .replace("{{TOTAL_DAYS}}", &config.total_days.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>The Streak Lab</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --done: #2d7a4b;
      --miss: #c63b2b;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 0 18px 48px;
    }

    nav {
      width: min(860px, 100%);
      display: flex;
      align-items: center;
      justify-content: space-between;
      padding: 18px 4px;
    }

    .brand {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: 1.2rem;
      color: var(--accent-2);
      text-decoration: none;
    }

    .nav-links {
      display: flex;
      gap: 18px;
      list-style: none;
      margin: 0;
      padding: 0;
    }

    .nav-links a {
      color: var(--accent-2);
      text-decoration: none;
      font-weight: 500;
    }

    .hamburger {
      display: none;
      background: none;
      border: none;
      box-shadow: none;
      font-size: 1.5rem;
      color: var(--accent-2);
      cursor: pointer;
      padding: 4px 10px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header.intro {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.streak {
      color: var(--accent);
    }

    .calendar-card {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .calendar-grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(48px, 1fr));
      gap: 10px;
    }

    .day {
      position: relative;
      display: grid;
      place-items: center;
      aspect-ratio: 1;
      border-radius: 14px;
      border: 1px solid rgba(47, 72, 88, 0.14);
      background: #fdfbf6;
      font-weight: 600;
      cursor: pointer;
      user-select: none;
      transition: transform 120ms ease, box-shadow 120ms ease;
    }

    .day:hover {
      transform: translateY(-2px);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    .day.completed {
      background: var(--done);
      border-color: var(--done);
      color: white;
    }

    .day.missed {
      background: var(--miss);
      border-color: var(--miss);
      color: white;
    }

    .day.today {
      outline: 3px solid var(--accent);
      outline-offset: 2px;
    }

    .day.future {
      opacity: 0.45;
      cursor: not-allowed;
    }

    .day.future:hover {
      transform: none;
      box-shadow: none;
    }

    .day.has-note::after {
      content: "";
      position: absolute;
      top: 6px;
      right: 6px;
      width: 7px;
      height: 7px;
      border-radius: 50%;
      background: var(--accent);
    }

    .day.completed.has-note::after,
    .day.missed.has-note::after {
      background: white;
    }

    .note-section {
      display: none;
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .note-section h2 {
      margin: 0 0 12px;
      font-size: 1.2rem;
    }

    .note-section textarea {
      width: 100%;
      min-height: 72px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      padding: 12px;
      font-family: inherit;
      font-size: 0.95rem;
      resize: vertical;
    }

    .note-actions {
      display: flex;
      gap: 10px;
      margin-top: 12px;
    }

    .actions {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 16px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
      display: inline-flex;
      align-items: center;
      justify-content: center;
      gap: 10px;
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-export {
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
    }

    .btn-reset {
      background: var(--miss);
      color: white;
      box-shadow: 0 10px 24px rgba(198, 59, 43, 0.3);
    }

    .btn-note {
      background: var(--accent);
      color: white;
      padding: 10px 18px;
      font-size: 0.95rem;
    }

    .btn-quiet {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
      padding: 10px 18px;
      font-size: 0.95rem;
      box-shadow: none;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }

      .hamburger {
        display: block;
      }

      .nav-links {
        display: none;
        position: absolute;
        top: 64px;
        right: 18px;
        flex-direction: column;
        background: white;
        border-radius: 16px;
        padding: 16px 22px;
        box-shadow: var(--shadow);
        z-index: 10;
      }

      .nav-links.active {
        display: flex;
      }

      button {
        width: 100%;
      }
    }
  </style>
</head>
<body>
  <nav>
    <a class="brand" href="/">The Streak Lab</a>
    <button class="hamburger" type="button" aria-label="Toggle menu">&#9776;</button>
    <ul class="nav-links" id="navMenu">
      <li><a href="/">Tracker</a></li>
      <li><a href="/api/export">Export</a></li>
    </ul>
  </nav>

  <main class="app">
    <header class="intro">
      <h1>{{NAME}}</h1>
      <p class="subtitle">{{TOTAL_DAYS}} days. Tap a day to cycle it through done, missed, and unmarked.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Current streak</span>
        <span id="current-streak" class="value streak">0</span>
      </div>
      <div class="stat">
        <span class="label">Longest streak</span>
        <span id="longest-streak" class="value">0</span>
      </div>
      <div class="stat">
        <span class="label">Complete</span>
        <span class="value"><span id="percent-complete">0</span>%</span>
      </div>
      <div class="stat">
        <span class="label">Day</span>
        <span class="value"><span id="days-elapsed">0</span> / {{TOTAL_DAYS}}</span>
      </div>
    </section>

    <section class="calendar-card">
      <div id="calendar-grid" class="calendar-grid"></div>
    </section>

    <section class="note-section" id="note-section">
      <h2>Note for day <span id="note-day"></span></h2>
      <textarea id="note-input" placeholder="How did it go?"></textarea>
      <div class="note-actions">
        <button class="btn-note" id="note-save" type="button">Save note</button>
        <button class="btn-quiet" id="note-close" type="button">Close</button>
      </div>
    </section>

    <section class="actions">
      <button class="btn-export" id="export-btn" type="button">Export summary</button>
      <button class="btn-reset" id="reset-btn" type="button">Reset experiment</button>
    </section>

    <div class="status" id="status"></div>
    <p class="hint">Days roll over at local midnight. Future days unlock as they arrive.</p>
  </main>

  <script>
    const grid = document.getElementById('calendar-grid');
    const statusEl = document.getElementById('status');
    const noteSection = document.getElementById('note-section');
    const noteDayEl = document.getElementById('note-day');
    const noteInput = document.getElementById('note-input');

    let tracker = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const updateStats = () => {
      document.getElementById('current-streak').textContent = tracker.current_streak;
      document.getElementById('longest-streak').textContent = tracker.longest_streak;
      document.getElementById('percent-complete').textContent = tracker.percent_complete;
      document.getElementById('days-elapsed').textContent = tracker.current_day;
    };

    const renderCalendar = () => {
      grid.innerHTML = '';
      const currentDay = tracker.current_day;

      for (let day = 1; day <= tracker.total_days; day++) {
        const dayEl = document.createElement('div');
        dayEl.className = 'day';
        dayEl.textContent = day;
        dayEl.setAttribute(
          'aria-label',
          `Day ${day}${day === currentDay ? ' (today)' : ''}${day > currentDay ? ' (future)' : ''}`
        );

        if (tracker.completed.includes(day)) dayEl.classList.add('completed');
        if (tracker.missed.includes(day)) dayEl.classList.add('missed');
        if (tracker.notes[day]) dayEl.classList.add('has-note');
        if (day === currentDay) dayEl.classList.add('today');
        if (day > currentDay) dayEl.classList.add('future');

        dayEl.onclick = () => {
          if (day <= currentDay) toggleDay(day);
        };

        grid.appendChild(dayEl);
      }

      updateStats();
    };

    const post = async (path, body) => {
      const res = await fetch(path, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    const toggleDay = async (day) => {
      try {
        tracker = await post('/api/toggle', { day });
        renderCalendar();
        noteDayEl.textContent = day;
        noteInput.value = tracker.notes[day] || '';
        noteSection.style.display = 'block';
        noteInput.focus();
        setStatus('', '');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    };

    const saveNote = async () => {
      const day = parseInt(noteDayEl.textContent, 10);
      if (!day) return;
      try {
        setStatus('Saving...', '');
        tracker = await post('/api/note', { day, text: noteInput.value });
        renderCalendar();
        setStatus('Saved', 'ok');
        setTimeout(() => setStatus('', ''), 1200);
      } catch (err) {
        setStatus(err.message, 'error');
      }
    };

    const resetTracker = async () => {
      if (!confirm(`Reset ${tracker.name}? All data will be cleared permanently.`)) {
        return;
      }
      try {
        tracker = await post('/api/reset');
        noteSection.style.display = 'none';
        renderCalendar();
        setStatus('Experiment reset', 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    };

    document.getElementById('note-save').addEventListener('click', saveNote);
    document.getElementById('note-close').addEventListener('click', () => {
      noteSection.style.display = 'none';
    });
    document.getElementById('reset-btn').addEventListener('click', resetTracker);
    document.getElementById('export-btn').addEventListener('click', () => {
      window.location.href = '/api/export';
    });

    const hamburger = document.querySelector('.hamburger');
    const navLinks = document.getElementById('navMenu');
    hamburger.addEventListener('click', () => {
      navLinks.classList.toggle('active');
    });
    navLinks.querySelectorAll('a').forEach((link) => {
      link.addEventListener('click', () => {
        navLinks.classList.remove('active');
      });
    });

    fetch('/api/tracker')
      .then((res) => {
        if (!res.ok) throw new Error('Unable to load tracker');
        return res.json();
      })
      .then((data) => {
        tracker = data;
        renderCalendar();
      })
      .catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
