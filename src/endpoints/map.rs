pub(super) const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
  <title>skycast</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" crossorigin="" />
  <link rel="stylesheet" href="https://unpkg.com/leaflet-timedimension@1.1.1/dist/leaflet.timedimension.control.css" />
  <style>
    html, body { height: 100%; margin: 0; padding: 0; }
    #map { height: 100%; width: 100%; }
    #legend {
      position: absolute;
      top: 12px;
      right: 12px;
      z-index: 1000;
      border: 1px solid gray;
      background: white;
    }
  </style>
</head>
<body>
  <div id="map"></div>
  <img id="legend" alt="legend" />
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" crossorigin=""></script>
  <script src="https://unpkg.com/iso8601-js-period@0.2.1/iso8601.min.js"></script>
  <script src="https://unpkg.com/leaflet-timedimension@1.1.1/dist/leaflet.timedimension.src.js"></script>
  <script>
    const HOURS_PER_FORECAST = 3;
    const LAYERS = {
      'Temperature': 'tmp',
      'Precipitation': 'prate',
      'Pressure': 'pres',
      'Humidity': 'rh',
      'Wind speed (gust)': 'gust',
    };

    let map;
    let lastStartDatetime;

    async function fetchCycle() {
      try {
        const response = await fetch('/api/forecast_cycle');
        if (!response.ok) {
          throw new Error('forecast cycle request failed: ' + response.status);
        }
        return await response.json();
      } catch (error) {
        console.error('Fetch error: ', error);
        return null;
      }
    }

    function render(startDatetime, numForecasts) {
      const hourLimit = (numForecasts - 1) * HOURS_PER_FORECAST;
      const start = new Date(startDatetime).toISOString().substring(0, 13);

      if (map) {
        map.off();
        map.remove();
      }

      map = L.map('map', {
        center: [20, -10],
        zoom: 3,
        minZoom: 3,
        maxZoom: 6,
        timeDimension: true,
        timeDimensionOptions: {
          timeInterval: `${startDatetime}/PT${hourLimit}H`,
          period: `PT${HOURS_PER_FORECAST}H`,
        },
        timeDimensionControl: true,
        timeDimensionControlOptions: {
          playerOptions: { transitionTime: 2000 },
          playButton: true,
          loopButton: true,
          speedSlider: false,
        },
      });

      L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
        attribution: '&copy; <a href="http://www.openstreetmap.org/copyright">OpenStreetMap</a>',
        zIndex: 19,
      }).addTo(map);

      const overlays = {};
      Object.entries(LAYERS).forEach(([name, code]) => {
        overlays[name] = L.timeDimension.layer(
          L.tileLayer(`/layers/${start}/{d}/${code}/{z}/{x}/{y}.png`, { tms: true })
        );
      });

      const defaultLayer = 'Temperature';
      overlays[defaultLayer].addTo(map);
      L.control.layers(overlays, []).addTo(map);

      const legend = document.getElementById('legend');
      legend.src = `/layers/${LAYERS[defaultLayer]}.png`;
      map.on('baselayerchange', (ev) => {
        legend.src = `/layers/${LAYERS[ev.name]}.png`;
      });
    }

    async function init() {
      const data = await fetchCycle();
      if (data && lastStartDatetime !== data.startDatetime) {
        render(data.startDatetime, data.numForecasts);
        lastStartDatetime = data.startDatetime;
      }
    }

    document.addEventListener('visibilitychange', () => {
      if (document.visibilityState === 'visible') {
        init();
      }
    });
    init();
  </script>
</body>
</html>
"#;
